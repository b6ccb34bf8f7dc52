use serde::Serialize;

use crate::domain::BaseStat;
use crate::error::DexError;

/// Normalization ceiling for stat bars. A domain constant (the highest
/// base stat the source games define), not derived from the data.
pub const MAX_BASE_STAT: u32 = 255;

/// Canonical display slot for a stat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatSlot {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    /// A stat name outside the canonical six. Kept in the summary and
    /// counted in the total; rendered generically.
    Other,
}

impl StatSlot {
    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "hp" => StatSlot::Hp,
            "attack" => StatSlot::Attack,
            "defense" => StatSlot::Defense,
            "special-attack" => StatSlot::SpecialAttack,
            "special-defense" => StatSlot::SpecialDefense,
            "speed" => StatSlot::Speed,
            _ => StatSlot::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatRow {
    pub name: String,
    pub slot: StatSlot,
    pub value: u32,
    /// value / 255 clamped to [0, 1], for proportional bar sizing.
    pub fraction: f64,
    pub is_max: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatSummary {
    pub rows: Vec<StatRow>,
    pub total: u64,
    pub max_value: u32,
}

/// Summarize a species' stat list: per-row normalized fraction, maxima
/// flags (every row tied at the maximum is flagged, not just the
/// first), and the total. Purely a function of its input.
pub fn summarize(stats: &[BaseStat]) -> Result<StatSummary, DexError> {
    if stats.is_empty() {
        return Err(DexError::EmptyStats);
    }

    let max_value = stats.iter().map(|s| s.value).max().unwrap_or(0);
    let total = stats.iter().map(|s| u64::from(s.value)).sum();

    let rows = stats
        .iter()
        .map(|stat| {
            let slot = StatSlot::from_name(&stat.name);
            if slot == StatSlot::Other {
                tracing::debug!(name = %stat.name, "stat has no canonical display slot");
            }
            StatRow {
                name: stat.name.clone(),
                slot,
                value: stat.value,
                fraction: (f64::from(stat.value) / f64::from(MAX_BASE_STAT)).clamp(0.0, 1.0),
                is_max: stat.value == max_value,
            }
        })
        .collect();

    Ok(StatSummary {
        rows,
        total,
        max_value,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn stat(name: &str, value: u32) -> BaseStat {
        BaseStat {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn summarize_pikachu_baseline() {
        let stats = [
            stat("hp", 35),
            stat("attack", 55),
            stat("defense", 40),
            stat("special-attack", 50),
            stat("special-defense", 50),
            stat("speed", 90),
        ];
        let summary = summarize(&stats).unwrap();
        assert_eq!(summary.total, 320);
        assert_eq!(summary.max_value, 90);
        let maxed: Vec<&str> = summary
            .rows
            .iter()
            .filter(|r| r.is_max)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(maxed, vec!["speed"]);
        let hp = &summary.rows[0];
        assert_eq!(hp.slot, StatSlot::Hp);
        assert!((hp.fraction - 35.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn ties_flag_every_maximum() {
        let summary = summarize(&[stat("hp", 100), stat("attack", 100)]).unwrap();
        assert!(summary.rows.iter().all(|r| r.is_max));
    }

    #[test]
    fn fraction_clamps_at_the_ceiling() {
        let summary = summarize(&[stat("attack", 300), stat("hp", 0)]).unwrap();
        assert_eq!(summary.rows[0].fraction, 1.0);
        assert_eq!(summary.rows[1].fraction, 0.0);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = summarize(&[]).unwrap_err();
        assert_matches!(err, DexError::EmptyStats);
    }

    #[test]
    fn unknown_stat_name_lands_in_the_other_slot() {
        let summary = summarize(&[stat("evasion", 10), stat("HP", 20)]).unwrap();
        assert_eq!(summary.rows[0].slot, StatSlot::Other);
        assert_eq!(summary.rows[1].slot, StatSlot::Hp);
        assert_eq!(summary.total, 30);
    }
}
