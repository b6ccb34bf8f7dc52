use std::collections::HashMap;

use crate::domain::{Species, SpeciesId};
use crate::search;

/// In-memory collection of fetched species, keyed by dex number with
/// insertion order preserved for stable display.
///
/// Append-only: entries are never removed or replaced, so a catalog
/// observed mid-load is always a valid partial result.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    order: Vec<SpeciesId>,
    by_id: HashMap<SpeciesId, Species>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a species. Returns false (leaving the stored entry
    /// untouched) if the id is already present.
    pub fn insert(&mut self, species: Species) -> bool {
        if self.by_id.contains_key(&species.id) {
            return false;
        }
        self.order.push(species.id);
        self.by_id.insert(species.id, species);
        true
    }

    pub fn get(&self, id: SpeciesId) -> Option<&Species> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: SpeciesId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.order.iter().map(|id| &self.by_id[id])
    }

    pub fn ids(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        self.order.iter().copied()
    }

    /// Entries matching the query, in insertion order. The predicate is
    /// re-applied to every entry on every call; nothing is cached.
    pub fn filter<'a>(&'a self, query: &str) -> Vec<&'a Species> {
        self.iter()
            .filter(|species| search::matches(species, query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: u32, name: &str) -> Species {
        Species {
            id: SpeciesId::new(id),
            name: name.to_string(),
            sprite_url: None,
            types: Vec::new(),
            stats: Vec::new(),
        }
    }

    #[test]
    fn insert_preserves_order() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(species(4, "charmander")));
        assert!(catalog.insert(species(1, "bulbasaur")));
        assert!(catalog.insert(species(7, "squirtle")));
        let names: Vec<&str> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "bulbasaur", "squirtle"]);
    }

    #[test]
    fn duplicate_insert_is_a_noop() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(species(25, "pikachu")));
        assert!(!catalog.insert(species(25, "impostor")));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(SpeciesId::new(25)).unwrap().name, "pikachu");
    }

    #[test]
    fn filter_applies_predicate_in_order() {
        let mut catalog = Catalog::new();
        catalog.insert(species(25, "pikachu"));
        catalog.insert(species(26, "raichu"));
        catalog.insert(species(150, "mewtwo"));
        let hits = catalog.filter("chu");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "pikachu");
        assert_eq!(hits[1].name, "raichu");
    }
}
