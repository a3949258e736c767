//! Clear command implementation

use anyhow::Result;
use tracing::{info, warn};

use crate::storage::LogStore;

/// Run the clear command; returns whether anything was deleted
pub async fn run_clear_command(store: &dyn LogStore, confirm: bool) -> Result<bool> {
    if !confirm {
        warn!("Clear requested without confirmation");
        eprintln!("Refusing to clear data: pass --confirm to mark all assets and logs deleted.");
        return Ok(false);
    }

    store
        .soft_delete_all()
        .await
        .map_err(crate::error::RelibotError::from)?;
    info!("Soft-deleted all data in {} store", store.backend_name());
    println!("All assets and logs marked as deleted.");
    Ok(true)
}
