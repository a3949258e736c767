//! Command routing and execution
//!
//! This module handles routing CLI commands to their respective implementations.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::config::Config;
use crate::filter::LogFilter;
use crate::storage::{BackendType, LogStore, StorageFactory};

async fn open_backend(
    backend: BackendType,
    config: &Config,
    data_file: Option<PathBuf>,
) -> Result<Arc<dyn LogStore>> {
    Ok(StorageFactory::open(backend, config, data_file.as_deref()).await?)
}

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(cli: Cli, config: &Config) -> Result<()> {
    let backend = cli.store;
    let data_file = cli.data_file;
    let open_store = move || open_backend(backend, config, data_file.clone());

    match cli.command {
        Commands::Upload { ref file, yes } => run_upload_command(file, yes, open_store).await,
        Commands::Assets { json } => run_assets_command(open_store().await?.as_ref(), json).await,
        Commands::Logs { ref filter, json } => {
            let filter = LogFilter::from(filter.clone());
            run_logs_command(open_store().await?.as_ref(), &filter, json).await
        }
        Commands::Stats { ref filter, json } => {
            let filter = LogFilter::from(filter.clone());
            run_stats_command(open_store().await?.as_ref(), &filter, json).await
        }
        Commands::Pareto { ref filter, json } => {
            let filter = LogFilter::from(filter.clone());
            run_pareto_command(open_store().await?.as_ref(), &filter, json).await
        }
        Commands::Export {
            format,
            ref output,
            ref filter,
        } => {
            let filter = LogFilter::from(filter.clone());
            run_export_command(
                open_store().await?.as_ref(),
                config,
                &filter,
                format,
                output.clone(),
            )
            .await?;
            Ok(())
        }
        Commands::Clear { confirm } => {
            run_clear_command(open_store().await?.as_ref(), confirm).await?;
            Ok(())
        }
        Commands::Webhook { ref bind } => run_webhook_command(config, bind.clone()).await,
    }
}
