//! Asset and log listing commands

use anyhow::Result;

use super::load_filtered;
use crate::filter::LogFilter;
use crate::model::{EventTime, LogEntry};
use crate::storage::LogStore;

/// Run the assets command
pub async fn run_assets_command(store: &dyn LogStore, json: bool) -> Result<()> {
    let assets = store.list_assets().await.map_err(crate::error::RelibotError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assets)?);
        return Ok(());
    }

    if assets.is_empty() {
        println!("No assets found.");
        return Ok(());
    }

    println!("{:<8} {:<24} {:<16} Location", "ID", "Name", "Category");
    for asset in &assets {
        println!(
            "{:<8} {:<24} {:<16} {}",
            asset.id, asset.name, asset.category, asset.location
        );
    }
    Ok(())
}

/// Run the logs command
pub async fn run_logs_command(store: &dyn LogStore, filter: &LogFilter, json: bool) -> Result<()> {
    let (assets, logs) = load_filtered(store, filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&logs)?);
        return Ok(());
    }

    if logs.is_empty() {
        println!("No logs match.");
        return Ok(());
    }

    println!(
        "{:<8} {:<20} {:<8} {:<20} {:<20} Description",
        "ID", "Asset", "Type", "Time", "Failure mode"
    );
    for log in &logs {
        let asset = assets
            .iter()
            .find(|a| a.id == log.asset_id)
            .map(|a| a.name.as_str())
            .unwrap_or_else(|| log.asset_id.as_str());
        println!(
            "{:<8} {:<20} {:<8} {:<20} {:<20} {}",
            log.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            asset,
            log.event_type,
            display_time(log),
            log.failure_mode,
            log.description
        );
    }
    println!("{} log(s)", logs.len());
    Ok(())
}

fn display_time(log: &LogEntry) -> String {
    match &log.event_time {
        EventTime::Parsed(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        EventTime::Raw(raw) => raw.clone(),
    }
}
