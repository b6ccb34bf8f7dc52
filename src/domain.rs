use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DexError;

/// National dex number. Positive, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(u32);

impl SpeciesId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Zero-padded display form used on cards, e.g. `#025`.
    pub fn dex_number(self) -> String {
        format!("#{:03}", self.0)
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier accepted by the remote source: a dex number or a species
/// name, normalized to the lowercase trimmed form the API expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpeciesRef(String);

impl SpeciesRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeciesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpeciesRef {
    type Err = DexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DexError::InvalidSpeciesRef(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl From<SpeciesId> for SpeciesRef {
    fn from(id: SpeciesId) -> Self {
        Self(id.get().to_string())
    }
}

/// One type slot; slot 0/1 ordering decides the primary type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    pub name: String,
}

/// One named base stat as reported by the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

/// A fetched species record. Immutable once constructed.
///
/// `stats` is only guaranteed to be populated on a detail fetch; a
/// record obtained during the bulk phase may carry an empty list and
/// must be re-fetched before summarizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<BaseStat>,
}

impl Species {
    /// Name with its first letter uppercased, as shown on cards.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Type in the lowest slot, if the species has any types.
    pub fn primary_type(&self) -> Option<&str> {
        self.types
            .iter()
            .min_by_key(|t| t.slot)
            .map(|t| t.name.as_str())
    }

    /// Type names ordered by slot, for display.
    pub fn ordered_types(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.name.as_str()).collect()
    }

    pub fn has_stats(&self) -> bool {
        !self.stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn species(id: u32, name: &str) -> Species {
        Species {
            id: SpeciesId::new(id),
            name: name.to_string(),
            sprite_url: None,
            types: vec![
                TypeSlot {
                    slot: 2,
                    name: "flying".to_string(),
                },
                TypeSlot {
                    slot: 1,
                    name: "electric".to_string(),
                },
            ],
            stats: Vec::new(),
        }
    }

    #[test]
    fn parse_species_ref_normalizes() {
        let re: SpeciesRef = "  Pikachu ".parse().unwrap();
        assert_eq!(re.as_str(), "pikachu");
    }

    #[test]
    fn parse_species_ref_rejects_blank() {
        let err = "   ".parse::<SpeciesRef>().unwrap_err();
        assert_matches!(err, DexError::InvalidSpeciesRef(_));
    }

    #[test]
    fn species_ref_from_id() {
        let re = SpeciesRef::from(SpeciesId::new(25));
        assert_eq!(re.as_str(), "25");
    }

    #[test]
    fn dex_number_zero_pads() {
        assert_eq!(SpeciesId::new(25).dex_number(), "#025");
        assert_eq!(SpeciesId::new(1025).dex_number(), "#1025");
    }

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(species(25, "pikachu").display_name(), "Pikachu");
    }

    #[test]
    fn primary_type_takes_lowest_slot() {
        let sp = species(25, "pikachu");
        assert_eq!(sp.primary_type(), Some("electric"));
        assert_eq!(sp.ordered_types(), vec!["electric", "flying"]);
    }
}
