use serde::Serialize;

use crate::domain::{Species, SpeciesId};
use crate::stats::StatSummary;

/// Display-ready card payload for one fetched species.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub id: SpeciesId,
    pub number: String,
    pub name: String,
    pub sprite_url: Option<String>,
    pub types: Vec<String>,
}

impl From<&Species> for CardView {
    fn from(species: &Species) -> Self {
        Self {
            id: species.id,
            number: species.id.dex_number(),
            name: species.display_name(),
            sprite_url: species.sprite_url.clone(),
            types: species
                .ordered_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Notice for one isolated fetch failure.
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    pub identifier: String,
    pub message: String,
}

/// Where fetch results and stat summaries are delivered. Implementors
/// render; the core never does.
pub trait CatalogSink {
    fn card(&self, card: &CardView);
    fn fetch_failed(&self, notice: &FetchFailure);
    fn stats(&self, name: &str, summary: &StatSummary);
    fn stats_unavailable(&self, identifier: &str, message: &str);
}

/// Sink that swallows every event. Useful for queries that do not
/// need progressive output.
pub struct NullSink;

impl CatalogSink for NullSink {
    fn card(&self, _card: &CardView) {}
    fn fetch_failed(&self, _notice: &FetchFailure) {}
    fn stats(&self, _name: &str, _summary: &StatSummary) {}
    fn stats_unavailable(&self, _identifier: &str, _message: &str) {}
}

const BAR_WIDTH: usize = 30;

/// Human-readable console rendering.
pub struct ConsoleSink;

impl CatalogSink for ConsoleSink {
    fn card(&self, card: &CardView) {
        let types = card.types.join("/");
        if types.is_empty() {
            println!("{} {}", card.number, card.name);
        } else {
            println!("{} {} [{}]", card.number, card.name, types);
        }
    }

    fn fetch_failed(&self, notice: &FetchFailure) {
        eprintln!("!! {}: {}", notice.identifier, notice.message);
    }

    fn stats(&self, name: &str, summary: &StatSummary) {
        println!("{name}");
        for row in &summary.rows {
            let filled = (row.fraction * BAR_WIDTH as f64).round() as usize;
            let star = if row.is_max { " *" } else { "" };
            println!(
                "  {:<16} {:>3} {}{}{}",
                row.name,
                row.value,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                star
            );
        }
        println!("  {:<16} {:>3}", "total", summary.total);
    }

    fn stats_unavailable(&self, identifier: &str, message: &str) {
        eprintln!("stats unavailable for {identifier}: {message}");
    }
}

/// One JSON object per event, for non-interactive consumers.
pub struct JsonSink;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum JsonEvent<'a> {
    Card { card: &'a CardView },
    FetchFailed { notice: &'a FetchFailure },
    Stats { name: &'a str, summary: &'a StatSummary },
    StatsUnavailable { identifier: &'a str, message: &'a str },
}

impl JsonSink {
    fn emit(event: &JsonEvent<'_>) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::error!(%err, "failed to serialize sink event"),
        }
    }
}

impl CatalogSink for JsonSink {
    fn card(&self, card: &CardView) {
        Self::emit(&JsonEvent::Card { card });
    }

    fn fetch_failed(&self, notice: &FetchFailure) {
        Self::emit(&JsonEvent::FetchFailed { notice });
    }

    fn stats(&self, name: &str, summary: &StatSummary) {
        Self::emit(&JsonEvent::Stats { name, summary });
    }

    fn stats_unavailable(&self, identifier: &str, message: &str) {
        Self::emit(&JsonEvent::StatsUnavailable {
            identifier,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::TypeSlot;

    use super::*;

    #[test]
    fn card_view_orders_types_and_formats_number() {
        let species = Species {
            id: SpeciesId::new(6),
            name: "charizard".to_string(),
            sprite_url: Some("https://img.example/6.png".to_string()),
            types: vec![
                TypeSlot {
                    slot: 2,
                    name: "flying".to_string(),
                },
                TypeSlot {
                    slot: 1,
                    name: "fire".to_string(),
                },
            ],
            stats: Vec::new(),
        };
        let card = CardView::from(&species);
        assert_eq!(card.number, "#006");
        assert_eq!(card.name, "Charizard");
        assert_eq!(card.types, vec!["fire", "flying"]);
    }
}
