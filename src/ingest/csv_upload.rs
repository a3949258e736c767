//! Parsing of uploaded failure-log spreadsheets.
//!
//! Expected columns (any order, any delimiter among `, ; TAB |`):
//! `asset_name`, `event_type`, `event_time`, `failure_mode` and optionally
//! `category`, `location`, `description`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use super::timestamp::parse_event_time;
use crate::error::{ErrorCode, RelibotError, Result};
use crate::model::EventType;

pub const REQUIRED_COLUMNS: &[&str] = &["asset_name", "event_type", "event_time", "failure_mode"];

const CANDIDATE_DELIMITERS: &[u8] = b",;\t|";

/// One validated spreadsheet row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UploadRow {
    pub asset_name: String,
    pub category: String,
    pub location: String,
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub failure_mode: String,
    pub description: String,
}

/// Rows accepted from one upload, plus how many were discarded for an
/// unparseable `event_time`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UploadBatch {
    pub rows: Vec<UploadRow>,
    pub dropped_rows: usize,
}

impl UploadBatch {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct asset names in first-appearance order.
    pub fn asset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.asset_name.as_str()) {
                names.push(&row.asset_name);
            }
        }
        names
    }
}

/// Pick the delimiter that occurs most often in the header line.
pub fn sniff_delimiter(data: &[u8]) -> u8 {
    let header = data.split(|b| *b == b'\n').next().unwrap_or_default();
    CANDIDATE_DELIMITERS
        .iter()
        .map(|d| (*d, header.iter().filter(|b| *b == d).count()))
        .filter(|(_, n)| *n > 0)
        // max_by_key keeps the last maximum; iterate reversed so ',' wins ties.
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(d, _)| d)
        .unwrap_or(b',')
}

struct ColumnIndex {
    asset_name: usize,
    event_type: usize,
    event_time: usize,
    failure_mode: usize,
    category: Option<usize>,
    location: Option<usize>,
    description: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                RelibotError::ingest_with_code(
                    ErrorCode::INGEST_MISSING_COLUMN,
                    format!("missing required column '{}'", name),
                    Some(1),
                )
            })
        };

        Ok(Self {
            asset_name: require("asset_name")?,
            event_type: require("event_type")?,
            event_time: require("event_time")?,
            failure_mode: require("failure_mode")?,
            category: find("category"),
            location: find("location"),
            description: find("description"),
        })
    }
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Parse raw upload bytes into a batch of rows.
pub fn parse_upload(data: &[u8]) -> Result<UploadBatch> {
    if data.is_empty() {
        return Err(RelibotError::ingest_with_code(
            ErrorCode::INGEST_EMPTY_FILE,
            "Uploaded file is empty",
            None,
        ));
    }

    let data = data.strip_prefix("\u{feff}".as_bytes()).unwrap_or(data);
    let delimiter = sniff_delimiter(data);
    debug!("Using delimiter {:?} for upload", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut batch = UploadBatch::default();
    let mut seen_rows = 0usize;

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        seen_rows += 1;
        let line = record.position().map(|p| p.line());

        let asset_name = cell(&record, Some(columns.asset_name));
        if asset_name.is_empty() {
            return Err(RelibotError::ingest_with_code(
                ErrorCode::INGEST_MISSING_COLUMN,
                "row has an empty asset_name",
                line,
            ));
        }

        let raw_time = cell(&record, Some(columns.event_time));
        let Some(event_time) = parse_event_time(&raw_time) else {
            debug!("Dropping row at line {:?}: unparseable event_time {:?}", line, raw_time);
            batch.dropped_rows += 1;
            continue;
        };

        batch.rows.push(UploadRow {
            asset_name,
            category: cell(&record, columns.category),
            location: cell(&record, columns.location),
            event_type: EventType::from(cell(&record, Some(columns.event_type)).as_str()),
            event_time,
            failure_mode: cell(&record, Some(columns.failure_mode)),
            description: cell(&record, columns.description),
        });
    }

    if seen_rows == 0 {
        return Err(RelibotError::ingest_with_code(
            ErrorCode::INGEST_NO_ROWS,
            "CSV file has no rows",
            None,
        ));
    }

    if batch.dropped_rows > 0 {
        warn!(
            "Dropped {} row(s) with an unparseable event_time",
            batch.dropped_rows
        );
    }
    info!("Parsed {} log entries from upload", batch.rows.len());

    Ok(batch)
}

/// Read and parse an upload from disk.
pub fn load_upload(path: &Path) -> Result<UploadBatch> {
    let data = std::fs::read(path).map_err(|e| {
        RelibotError::ingest_with_code(
            ErrorCode::INGEST_UNREADABLE_FILE,
            format!("cannot read {}", path.display()),
            None,
        )
        .with_source(e)
    })?;
    parse_upload(&data)
}
