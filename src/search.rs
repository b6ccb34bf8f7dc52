use crate::domain::Species;

/// Decide whether a species is visible under a search query.
///
/// A blank query (after trimming) matches everything. Otherwise the
/// species matches if its lowercased name contains the lowercased query
/// as a substring, or the query equals its dex number — either as the
/// literal decimal string or as a parsed base-10 integer. No fuzzy
/// matching, no tokenization.
pub fn matches(species: &Species, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    if species.name.to_lowercase().contains(&query) {
        return true;
    }

    if species.id.get().to_string() == query {
        return true;
    }
    matches!(query.parse::<u32>(), Ok(id) if id == species.id.get())
}

#[cfg(test)]
mod tests {
    use crate::domain::SpeciesId;

    use super::*;

    fn pikachu() -> Species {
        Species {
            id: SpeciesId::new(25),
            name: "pikachu".to_string(),
            sprite_url: None,
            types: Vec::new(),
            stats: Vec::new(),
        }
    }

    #[test]
    fn blank_query_matches_everything() {
        assert!(matches(&pikachu(), ""));
        assert!(matches(&pikachu(), "   "));
    }

    #[test]
    fn name_substring_is_case_insensitive() {
        assert!(matches(&pikachu(), "pika"));
        assert!(matches(&pikachu(), "PIKA"));
        assert!(matches(&pikachu(), " kach "));
        assert!(!matches(&pikachu(), "char"));
    }

    #[test]
    fn numeric_query_must_equal_the_id() {
        assert!(matches(&pikachu(), "25"));
        assert!(!matches(&pikachu(), "26"));
        // "026" parses to 26, not 25, and is not the literal decimal
        // form of 25 either.
        assert!(!matches(&pikachu(), "026"));
    }

    #[test]
    fn zero_padded_query_matches_via_numeric_parse() {
        assert!(matches(&pikachu(), "025"));
    }
}
