//! Narrowing the log view by asset name and date range

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{Asset, AssetId, LogEntry};

/// Caller-owned filter state for log listings and reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    /// Exact asset name
    pub asset_name: Option<String>,
    /// Earliest calendar date kept, inclusive
    pub start_date: Option<NaiveDate>,
    /// Latest calendar date kept, inclusive
    pub end_date: Option<NaiveDate>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset_name(mut self, name: impl Into<String>) -> Self {
        self.asset_name = Some(name.into());
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.asset_name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Ids of assets carrying the filter's name; `None` when the name filter
    /// does not apply.
    fn matching_assets(&self, assets: &[Asset]) -> Option<Vec<AssetId>> {
        let name = self.asset_name.as_deref()?;
        let ids: Vec<AssetId> = assets
            .iter()
            .filter(|a| !a.deleted && a.name == name)
            .map(|a| a.id.clone())
            .collect();

        if ids.is_empty() {
            warn!("No asset named '{}', showing all assets", name);
            return None;
        }
        Some(ids)
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }

    /// Apply the filter to `logs`, resolving asset names against `assets`.
    pub fn apply(&self, assets: &[Asset], logs: Vec<LogEntry>) -> Vec<LogEntry> {
        let asset_ids = self.matching_assets(assets);
        let before = logs.len();

        let kept: Vec<LogEntry> = logs
            .into_iter()
            .filter(|log| {
                asset_ids
                    .as_ref()
                    .map_or(true, |ids| ids.contains(&log.asset_id))
            })
            .filter(|log| match log.event_time.resolve() {
                Some(ts) => self.in_range(ts.date_naive()),
                None => false,
            })
            .collect();

        debug!("Filter kept {} of {} log entries", kept.len(), before);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventTime, EventType};

    fn asset(id: &str, name: &str) -> Asset {
        Asset {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            location: String::new(),
            deleted: false,
        }
    }

    fn log(asset_id: &str, when: &str) -> LogEntry {
        LogEntry {
            id: None,
            asset_id: asset_id.into(),
            event_type: EventType::Failure,
            event_time: EventTime::from(when),
            failure_mode: "jam".into(),
            description: String::new(),
            deleted: false,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> (Vec<Asset>, Vec<LogEntry>) {
        let assets = vec![asset("1", "Press"), asset("2", "Fan"), asset("3", "Press")];
        let logs = vec![
            log("1", "2024-01-01T10:00:00Z"),
            log("2", "2024-01-05T10:00:00Z"),
            log("3", "2024-01-10T23:59:00Z"),
            log("2", "2024-02-01T00:00:00Z"),
        ];
        (assets, logs)
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let (assets, logs) = sample();
        let filter = LogFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&assets, logs).len(), 4);
    }

    #[test]
    fn test_name_matches_every_asset_with_that_name() {
        let (assets, logs) = sample();
        let kept = LogFilter::new().with_asset_name("Press").apply(&assets, logs);
        let ids: Vec<&str> = kept.iter().map(|l| l.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_unknown_name_is_ignored() {
        let (assets, logs) = sample();
        let kept = LogFilter::new().with_asset_name("Crane").apply(&assets, logs);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let (assets, logs) = sample();
        let kept = LogFilter::new()
            .with_date_range(Some(date(2024, 1, 5)), Some(date(2024, 1, 10)))
            .apply(&assets, logs);
        let ids: Vec<&str> = kept.iter().map(|l| l.asset_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_open_ended_range() {
        let (assets, logs) = sample();
        let kept = LogFilter::new()
            .with_date_range(Some(date(2024, 1, 6)), None)
            .apply(&assets, logs);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_unparseable_times_are_dropped() {
        let assets = vec![asset("1", "Press")];
        let logs = vec![log("1", "someday"), log("1", "2024-03-01")];
        assert_eq!(LogFilter::new().apply(&assets, logs).len(), 1);
    }

    #[test]
    fn test_name_and_dates_combine() {
        let (assets, logs) = sample();
        let kept = LogFilter::new()
            .with_asset_name("Fan")
            .with_date_range(None, Some(date(2024, 1, 31)))
            .apply(&assets, logs);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].asset_id.as_str(), "2");
    }
}
