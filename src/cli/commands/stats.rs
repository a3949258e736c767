//! Statistics commands

use anyhow::Result;

use super::load_filtered;
use crate::filter::LogFilter;
use crate::stats::{failure_mode_pareto, summarize_logs};
use crate::storage::LogStore;

/// Run the stats command
pub async fn run_stats_command(store: &dyn LogStore, filter: &LogFilter, json: bool) -> Result<()> {
    let (assets, logs) = load_filtered(store, filter).await?;
    let stats = summarize_logs(&logs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.is_empty() {
        println!("No logs to analyse.");
        return Ok(());
    }

    println!(
        "{:<8} {:<24} {:>12} {:>12}",
        "Asset ID", "Asset", "MTBF (hrs)", "MTTR (hrs)"
    );
    for summary in &stats {
        let name = assets
            .iter()
            .find(|a| a.id == summary.asset_id)
            .map(|a| a.name.as_str())
            .unwrap_or_default();
        println!(
            "{:<8} {:<24} {:>12} {:>12}",
            summary.asset_id,
            name,
            summary.mtbf_display(),
            summary.mttr_display()
        );
    }
    Ok(())
}

/// Run the pareto command
pub async fn run_pareto_command(store: &dyn LogStore, filter: &LogFilter, json: bool) -> Result<()> {
    let (_, logs) = load_filtered(store, filter).await?;
    let buckets = failure_mode_pareto(&logs);

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(());
    }

    if buckets.is_empty() {
        println!("No logs to analyse.");
        return Ok(());
    }

    println!("{:<24} {:>6} {:>12}", "Failure mode", "Count", "Cumulative");
    for bucket in &buckets {
        println!(
            "{:<24} {:>6} {:>11.1}%",
            bucket.failure_mode, bucket.count, bucket.cumulative_percent
        );
    }
    Ok(())
}
