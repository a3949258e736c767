//! Failure-mode frequency breakdown.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::LogEntry;

/// Label used for log rows without a failure mode.
pub const UNSPECIFIED_MODE: &str = "(unspecified)";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParetoBucket {
    pub failure_mode: String,
    pub count: usize,
    /// Share of all rows covered by this bucket and every bucket before it,
    /// as a percentage.
    pub cumulative_percent: f64,
}

/// Count log rows per failure mode, most frequent first.
///
/// Ties are ordered by mode name so the output is stable.
pub fn failure_mode_pareto(logs: &[LogEntry]) -> Vec<ParetoBucket> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for log in logs {
        let mode = log.failure_mode.trim();
        let mode = if mode.is_empty() { UNSPECIFIED_MODE } else { mode };
        *counts.entry(mode).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = logs.len() as f64;
    let mut running = 0usize;
    ranked
        .into_iter()
        .map(|(mode, count)| {
            running += count;
            ParetoBucket {
                failure_mode: mode.to_string(),
                count,
                cumulative_percent: running as f64 * 100.0 / total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetId, EventTime, EventType};

    fn log(mode: &str) -> LogEntry {
        LogEntry {
            id: None,
            asset_id: AssetId::from("1"),
            event_type: EventType::Failure,
            event_time: EventTime::from("2024-01-01T00:00:00Z"),
            failure_mode: mode.to_string(),
            description: String::new(),
            deleted: false,
        }
    }

    #[test]
    fn test_sorted_by_count_then_name() {
        let logs = vec![
            log("seal leak"),
            log("bearing wear"),
            log("seal leak"),
            log("overheat"),
            log("bearing wear"),
            log("seal leak"),
        ];
        let buckets = failure_mode_pareto(&logs);

        let modes: Vec<(&str, usize)> = buckets
            .iter()
            .map(|b| (b.failure_mode.as_str(), b.count))
            .collect();
        assert_eq!(
            modes,
            vec![("seal leak", 3), ("bearing wear", 2), ("overheat", 1)]
        );
        assert_eq!(buckets[0].cumulative_percent, 50.0);
        assert!((buckets[2].cumulative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_modes_are_grouped() {
        let buckets = failure_mode_pareto(&[log(""), log("  "), log("jam")]);
        assert_eq!(buckets[0].failure_mode, UNSPECIFIED_MODE);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(failure_mode_pareto(&[]).is_empty());
    }
}
