//! Upload command implementation

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::ingest::{load_upload, UploadBatch};
use crate::storage::LogStore;
use crate::upload::upload_batch;

const PREVIEW_ROWS: usize = 5;

/// Run the upload command.
///
/// `store` is opened lazily so a preview works without backend credentials.
pub async fn run_upload_command<F, Fut>(file: &Path, yes: bool, open_store: F) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<Arc<dyn LogStore>>>,
{
    let batch = load_upload(file)?;

    if !yes {
        print_preview(&batch);
        println!("Preview only. Re-run with --yes to upload.");
        return Ok(());
    }

    let store = open_store().await?;
    let summary = upload_batch(store.as_ref(), &batch).await?;

    println!(
        "Uploaded {} log entries for {} new assets.",
        summary.logs_inserted, summary.assets_created
    );
    if summary.dropped_rows > 0 {
        println!(
            "Skipped {} row(s) with an unreadable event_time.",
            summary.dropped_rows
        );
    }
    if !summary.skipped_assets.is_empty() {
        println!(
            "Could not create assets: {}",
            summary.skipped_assets.join(", ")
        );
    }
    Ok(())
}

fn print_preview(batch: &UploadBatch) {
    println!(
        "Parsed {} rows for {} assets ({} dropped).",
        batch.rows.len(),
        batch.asset_names().len(),
        batch.dropped_rows
    );
    for row in batch.rows.iter().take(PREVIEW_ROWS) {
        println!(
            "  {:<20} {:<10} {}  {}",
            row.asset_name,
            row.event_type,
            row.event_time.format("%Y-%m-%d %H:%M"),
            row.failure_mode
        );
    }
    if batch.rows.len() > PREVIEW_ROWS {
        println!("  ... {} more", batch.rows.len() - PREVIEW_ROWS);
    }
}
