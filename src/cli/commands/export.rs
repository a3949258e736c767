//! Export command implementation

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use super::load_filtered;
use crate::config::Config;
use crate::error::{ErrorCode, RelibotError};
use crate::filter::LogFilter;
use crate::report::{exporter_for, ExportFormat, Report};
use crate::storage::LogStore;

/// Run the export command, returning the written path
pub async fn run_export_command(
    store: &dyn LogStore,
    config: &Config,
    filter: &LogFilter,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let (assets, logs) = load_filtered(store, filter).await?;
    let report = Report::build(&assets, logs)?;

    let exporter = exporter_for(format, config.export.font_dir.clone());
    let bytes = exporter.export(&report).await?;

    let path = output.unwrap_or_else(|| format.default_path(&config.export.output_dir));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        RelibotError::export_with_code(
            ErrorCode::EXPORT_GENERIC,
            format!("could not write {}", path.display()),
            Some(format.to_string()),
        )
        .with_source(e)
    })?;

    info!("Wrote {} bytes of {} to {}", bytes.len(), format, path.display());
    println!("Wrote {}", path.display());
    Ok(path)
}
