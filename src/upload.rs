//! Persisting a parsed upload into the log store

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::error::{RelibotError, Result};
use crate::ingest::{timestamp::to_storage_string, UploadBatch};
use crate::model::{AssetId, NewAsset, NewLogEntry};
use crate::storage::LogStore;

/// Outcome of one upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadSummary {
    pub assets_created: usize,
    pub logs_inserted: usize,
    /// Rows discarded during parsing
    pub dropped_rows: usize,
    /// Asset names whose insert failed; their rows were skipped
    pub skipped_assets: Vec<String>,
}

/// Create one asset per distinct name, then insert every row as a log entry.
///
/// Each asset takes its category and location from the first row that names
/// it. When an asset insert fails its rows are skipped; if no asset could be
/// created at all the last failure is returned.
pub async fn upload_batch(store: &dyn LogStore, batch: &UploadBatch) -> Result<UploadSummary> {
    let mut summary = UploadSummary {
        dropped_rows: batch.dropped_rows,
        ..UploadSummary::default()
    };

    let mut ids: HashMap<&str, AssetId> = HashMap::new();
    let mut last_error: Option<RelibotError> = None;

    for name in batch.asset_names() {
        let Some(first) = batch.rows.iter().find(|row| row.asset_name == name) else {
            continue;
        };

        let asset = NewAsset::new(name, first.category.as_str(), first.location.as_str());
        match store.insert_asset(asset).await {
            Ok(stored) => {
                debug!("Created asset '{}' with id {}", name, stored.id);
                ids.insert(name, stored.id);
                summary.assets_created += 1;
            }
            Err(e) => {
                warn!("Could not create asset '{}': {}", name, e);
                summary.skipped_assets.push(name.to_string());
                last_error = Some(RelibotError::from(e).with_context(format!("asset '{}'", name)));
            }
        }
    }

    if summary.assets_created == 0 {
        if let Some(err) = last_error {
            return Err(err);
        }
    }

    let logs: Vec<NewLogEntry> = batch
        .rows
        .iter()
        .filter_map(|row| {
            ids.get(row.asset_name.as_str()).map(|id| NewLogEntry {
                asset_id: id.clone(),
                event_type: row.event_type.clone(),
                event_time: to_storage_string(&row.event_time),
                failure_mode: row.failure_mode.clone(),
                description: row.description.clone(),
                deleted: false,
            })
        })
        .collect();

    if logs.is_empty() {
        warn!("Upload produced no log entries");
        return Ok(summary);
    }

    summary.logs_inserted = store.insert_logs(logs).await?;
    info!(
        "Uploaded {} log entries for {} assets to {} store",
        summary.logs_inserted,
        summary.assets_created,
        store.backend_name()
    );

    Ok(summary)
}
