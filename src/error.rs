use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DexError {
    #[error("invalid species identifier: {0:?}")]
    InvalidSpeciesRef(String),

    #[error("species not found: {identifier} (PokeAPI status {status})")]
    SpeciesNotFound { identifier: String, status: u16 },

    #[error("PokeAPI request failed: {0}")]
    PokeApiHttp(String),

    #[error("PokeAPI payload for {identifier} did not decode: {message}")]
    PokeApiDecode { identifier: String, message: String },

    #[error("cannot summarize an empty stat list")]
    EmptyStats,
}
