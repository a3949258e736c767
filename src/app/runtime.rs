//! Runtime initialization and setup

use crate::app::{config::AppConfig, logging::init_logging};
use crate::config::{load_config, Config};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Load configuration and start logging.
///
/// The config file is read before logging starts so its `log_level` can
/// take effect; load errors are returned to the caller unlogged.
pub fn initialize_app(verbose: u8, config_path: Option<&Path>) -> Result<(AppConfig, Config)> {
    let config = load_config(config_path)?;
    let app = AppConfig::new(verbose)?.with_configured_level(config.log_level.clone());

    init_logging(&app);
    debug!("Working directory: {}", app.working_dir.display());

    Ok((app, config))
}
