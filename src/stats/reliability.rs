//! Mean time between failures and mean time to repair, per asset.

use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{ErrorCode, RelibotError, Result};
use crate::model::{AssetId, EventRecord, EventType, LogEntry};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Placeholder shown wherever a statistic is not applicable.
pub const NOT_APPLICABLE: &str = "N/A";

/// Reliability statistics of one asset.
///
/// `None` means the statistic is not applicable for the asset's history
/// (too few failures, or unmatched failure/repair counts).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReliabilitySummary {
    pub asset_id: AssetId,
    #[serde(serialize_with = "hours_or_na")]
    pub mtbf_hours: Option<f64>,
    #[serde(serialize_with = "hours_or_na")]
    pub mttr_hours: Option<f64>,
}

impl ReliabilitySummary {
    pub fn mtbf_display(&self) -> String {
        format_hours(self.mtbf_hours)
    }

    pub fn mttr_display(&self) -> String {
        format_hours(self.mttr_hours)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format an optional hour value with two decimals, or `N/A`.
pub fn format_hours(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", round2(v)),
        None => NOT_APPLICABLE.to_string(),
    }
}

fn hours_or_na<S: Serializer>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(round2(*v)),
        None => serializer.serialize_str(NOT_APPLICABLE),
    }
}

fn to_hours(delta: Duration) -> f64 {
    delta.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    Some(values.sum::<f64>() / count as f64)
}

/// Mean gap between consecutive failures, in hours. Needs two failures.
fn mtbf(failures: &[DateTime<Utc>]) -> Option<f64> {
    if failures.len() < 2 {
        return None;
    }
    mean(failures.windows(2).map(|pair| to_hours(pair[1] - pair[0])))
}

/// Mean of `repair[i] - failure[i]`, in hours.
///
/// Pairing is positional over the time-sorted sequences and only happens
/// when both sequences have the same non-zero length.
fn mttr(failures: &[DateTime<Utc>], repairs: &[DateTime<Utc>]) -> Option<f64> {
    if repairs.is_empty() || repairs.len() != failures.len() {
        return None;
    }
    mean(
        failures
            .iter()
            .zip(repairs)
            .map(|(failure, repair)| to_hours(*repair - *failure)),
    )
}

/// Compute one summary row per distinct asset, in first-appearance order.
///
/// Records whose timestamp cannot be parsed are left out before grouping.
/// A record with an empty `asset_id` is a caller bug and is rejected.
pub fn calculate_mtbf_mttr(records: &[EventRecord]) -> Result<Vec<ReliabilitySummary>> {
    let mut order: Vec<&AssetId> = Vec::new();
    let mut groups: HashMap<&AssetId, Vec<(DateTime<Utc>, &EventType)>> = HashMap::new();
    let mut dropped = 0usize;

    for record in records {
        if record.asset_id.is_empty() {
            return Err(RelibotError::validation_with_code(
                ErrorCode::VALIDATION_REQUIRED_FIELD,
                "event record has an empty asset_id",
                Some("asset_id".to_string()),
            ));
        }

        let Some(ts) = record.event_time.resolve() else {
            dropped += 1;
            continue;
        };

        groups
            .entry(&record.asset_id)
            .or_insert_with(|| {
                order.push(&record.asset_id);
                Vec::new()
            })
            .push((ts, &record.event_type));
    }

    if dropped > 0 {
        debug!("Dropped {} event(s) with unparseable timestamps", dropped);
    }

    let summaries = order
        .into_iter()
        .map(|asset_id| {
            let mut events = groups.remove(asset_id).unwrap_or_default();
            events.sort_by_key(|(ts, _)| *ts);

            let failures: Vec<DateTime<Utc>> = events
                .iter()
                .filter(|(_, kind)| **kind == EventType::Failure)
                .map(|(ts, _)| *ts)
                .collect();
            let repairs: Vec<DateTime<Utc>> = events
                .iter()
                .filter(|(_, kind)| **kind == EventType::Repair)
                .map(|(ts, _)| *ts)
                .collect();

            ReliabilitySummary {
                asset_id: asset_id.clone(),
                mtbf_hours: mtbf(&failures),
                mttr_hours: mttr(&failures, &repairs),
            }
        })
        .collect();

    Ok(summaries)
}

/// Convenience wrapper over stored log rows.
pub fn summarize_logs(logs: &[LogEntry]) -> Result<Vec<ReliabilitySummary>> {
    let records: Vec<EventRecord> = logs.iter().map(LogEntry::to_event_record).collect();
    calculate_mtbf_mttr(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at_hour(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    fn failure(asset: &str, hours: i64) -> EventRecord {
        EventRecord::new(asset, EventType::Failure, at_hour(hours))
    }

    fn repair(asset: &str, hours: i64) -> EventRecord {
        EventRecord::new(asset, EventType::Repair, at_hour(hours))
    }

    fn row<'a>(rows: &'a [ReliabilitySummary], asset: &str) -> &'a ReliabilitySummary {
        rows.iter()
            .find(|r| r.asset_id.as_str() == asset)
            .expect("asset row present")
    }

    #[test]
    fn test_paired_failures_and_repairs() {
        let records = vec![
            failure("A", 0),
            repair("A", 1),
            failure("A", 10),
            repair("A", 12),
        ];
        let rows = calculate_mtbf_mttr(&records).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mtbf_hours, Some(10.0));
        assert_eq!(rows[0].mttr_hours, Some(1.5));
    }

    #[test]
    fn test_single_failure_is_not_applicable() {
        let rows = calculate_mtbf_mttr(&[failure("B", 5)]).unwrap();
        assert_eq!(rows[0].mtbf_hours, None);
        assert_eq!(rows[0].mttr_hours, None);
        assert_eq!(rows[0].mtbf_display(), "N/A");
    }

    #[test]
    fn test_count_mismatch_keeps_mtbf() {
        let records = vec![failure("C", 0), repair("C", 2), failure("C", 6)];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        assert_eq!(rows[0].mtbf_hours, Some(6.0));
        assert_eq!(rows[0].mttr_hours, None);
    }

    #[test]
    fn test_unsorted_input_is_ordered_before_pairing() {
        let records = vec![
            repair("A", 12),
            failure("A", 10),
            repair("A", 1),
            failure("A", 0),
        ];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        assert_eq!(rows[0].mtbf_hours, Some(10.0));
        assert_eq!(rows[0].mttr_hours, Some(1.5));
    }

    #[test]
    fn test_pairing_is_positional() {
        // Two failures before any repair still pair f[0]->r[0], f[1]->r[1].
        let records = vec![failure("D", 0), failure("D", 2), repair("D", 3), repair("D", 7)];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        assert_eq!(rows[0].mttr_hours, Some(4.0));
    }

    #[test]
    fn test_repairs_without_failures() {
        let rows = calculate_mtbf_mttr(&[repair("E", 1)]).unwrap();
        assert_eq!(rows[0].mttr_hours, None);
    }

    #[test]
    fn test_other_event_types_are_ignored() {
        let records = vec![
            failure("F", 0),
            EventRecord::new("F", EventType::from("inspection"), at_hour(1)),
            failure("F", 4),
        ];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        assert_eq!(rows[0].mtbf_hours, Some(4.0));
    }

    #[test]
    fn test_unparseable_times_are_dropped() {
        let records = vec![
            failure("G", 0),
            EventRecord::new("G", EventType::Failure, "not a time"),
            EventRecord::new("G", EventType::Failure, "2024-01-01 03:00"),
            EventRecord::new("H", EventType::Failure, "garbage"),
        ];
        let rows = calculate_mtbf_mttr(&records).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(row(&rows, "G").mtbf_hours, Some(3.0));
    }

    #[test]
    fn test_rows_follow_first_appearance() {
        let records = vec![failure("Z", 0), failure("A", 0), failure("M", 0), failure("A", 1)];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_empty_asset_id_is_rejected() {
        let err = calculate_mtbf_mttr(&[failure(" ", 0)]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::VALIDATION_REQUIRED_FIELD);
    }

    #[test]
    fn test_empty_input() {
        assert!(calculate_mtbf_mttr(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_fractional_hours_and_serialisation() {
        let start = at_hour(0);
        let records = vec![
            EventRecord::new("K", EventType::Failure, start),
            EventRecord::new("K", EventType::Failure, start + Duration::minutes(100)),
        ];
        let rows = calculate_mtbf_mttr(&records).unwrap();
        assert_eq!(rows[0].mtbf_display(), "1.67");

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["asset_id"], "K");
        assert_eq!(json["mtbf_hours"], 1.67);
        assert_eq!(json["mttr_hours"], "N/A");
    }

    proptest! {
        #[test]
        fn prop_mtbf_is_mean_gap(mut hours in prop::collection::vec(0i64..10_000, 2..20)) {
            hours.sort_unstable();
            let records: Vec<EventRecord> = hours.iter().map(|h| failure("P", *h)).collect();
            let rows = calculate_mtbf_mttr(&records).unwrap();

            let expected = (hours[hours.len() - 1] - hours[0]) as f64 / (hours.len() - 1) as f64;
            let actual = rows[0].mtbf_hours.unwrap();
            prop_assert!((actual - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_one_row_per_asset_and_idempotent(
            events in prop::collection::vec((0usize..5, any::<bool>(), 0i64..500), 0..40)
        ) {
            let records: Vec<EventRecord> = events
                .iter()
                .map(|(asset, is_failure, h)| {
                    let id = format!("asset-{}", asset);
                    if *is_failure { failure(&id, *h) } else { repair(&id, *h) }
                })
                .collect();

            let first = calculate_mtbf_mttr(&records).unwrap();
            let second = calculate_mtbf_mttr(&records).unwrap();
            prop_assert_eq!(&first, &second);

            let mut distinct: Vec<&AssetId> = records.iter().map(|r| &r.asset_id).collect();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(first.len(), distinct.len());

            for summary in &first {
                let failures = records
                    .iter()
                    .filter(|r| r.asset_id == summary.asset_id && r.event_type == EventType::Failure)
                    .count();
                let repairs = records
                    .iter()
                    .filter(|r| r.asset_id == summary.asset_id && r.event_type == EventType::Repair)
                    .count();
                prop_assert_eq!(summary.mtbf_hours.is_some(), failures >= 2);
                prop_assert_eq!(summary.mttr_hours.is_some(), repairs > 0 && repairs == failures);
            }
        }
    }
}
