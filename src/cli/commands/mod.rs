//! Command implementation modules
//!
//! Each command is implemented as a separate module. Commands receive an
//! already opened store so they can be driven from tests.

pub mod clear;
pub mod export;
pub mod logs;
pub mod stats;
pub mod upload;
pub mod webhook;

pub use clear::run_clear_command;
pub use export::run_export_command;
pub use logs::{run_assets_command, run_logs_command};
pub use stats::{run_pareto_command, run_stats_command};
pub use upload::run_upload_command;
pub use webhook::run_webhook_command;

use anyhow::Result;

use crate::filter::LogFilter;
use crate::model::{Asset, LogEntry};
use crate::storage::LogStore;

/// Fetch both tables and apply `filter` to the logs
pub(crate) async fn load_filtered(
    store: &dyn LogStore,
    filter: &LogFilter,
) -> Result<(Vec<Asset>, Vec<LogEntry>)> {
    let assets = store.list_assets().await.map_err(crate::error::RelibotError::from)?;
    let logs = store.list_logs().await.map_err(crate::error::RelibotError::from)?;
    let logs = filter.apply(&assets, logs);
    Ok((assets, logs))
}
