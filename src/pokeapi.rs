use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::config::Settings;
use crate::domain::{BaseStat, Species, SpeciesId, SpeciesRef, TypeSlot};
use crate::error::DexError;

pub trait PokeApiClient: Send + Sync {
    /// Fetch one species by dex number or name. A single attempt: the
    /// caller decides what to do with each outcome kind.
    fn fetch(&self, re: &SpeciesRef) -> Result<Species, DexError>;
}

#[derive(Clone)]
pub struct PokeApiHttpClient {
    client: Client,
    base_url: String,
}

impl PokeApiHttpClient {
    pub fn new(settings: &Settings) -> Result<Self, DexError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pokedex-catalog-manager/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| DexError::PokeApiHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DexError::PokeApiHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    fn species_url(&self, re: &SpeciesRef) -> String {
        format!("{}/pokemon/{}", self.base_url.trim_end_matches('/'), re)
    }
}

impl PokeApiClient for PokeApiHttpClient {
    fn fetch(&self, re: &SpeciesRef) -> Result<Species, DexError> {
        let url = self.species_url(re);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| DexError::PokeApiHttp(err.to_string()))?;

        // Any non-2xx is the not-found outcome; only connect/timeout
        // level problems count as transport failures.
        if !response.status().is_success() {
            return Err(DexError::SpeciesNotFound {
                identifier: re.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|err| DexError::PokeApiHttp(err.to_string()))?;
        let dto: PokemonDto =
            serde_json::from_str(&body).map_err(|err| DexError::PokeApiDecode {
                identifier: re.to_string(),
                message: err.to_string(),
            })?;
        dto.into_species(re)
    }
}

#[derive(Debug, Deserialize)]
struct PokemonDto {
    id: u32,
    name: String,
    #[serde(default)]
    sprites: Option<SpritesDto>,
    #[serde(default)]
    types: Vec<TypeSlotDto>,
    #[serde(default)]
    stats: Vec<StatDto>,
}

#[derive(Debug, Deserialize)]
struct SpritesDto {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotDto {
    slot: u32,
    #[serde(rename = "type")]
    type_info: NamedDto,
}

#[derive(Debug, Deserialize)]
struct StatDto {
    base_stat: u32,
    stat: NamedDto,
}

#[derive(Debug, Deserialize)]
struct NamedDto {
    name: String,
}

impl PokemonDto {
    fn into_species(self, re: &SpeciesRef) -> Result<Species, DexError> {
        if self.id == 0 || self.name.trim().is_empty() {
            return Err(DexError::PokeApiDecode {
                identifier: re.to_string(),
                message: "payload is missing a positive id or a name".to_string(),
            });
        }
        Ok(Species {
            id: SpeciesId::new(self.id),
            name: self.name,
            sprite_url: self.sprites.and_then(|s| s.front_default),
            types: self
                .types
                .into_iter()
                .map(|t| TypeSlot {
                    slot: t.slot,
                    name: t.type_info.name,
                })
                .collect(),
            stats: self
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
        })
    }
}
