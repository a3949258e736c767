//! Core trait definitions for the log store

use async_trait::async_trait;

use super::error::StorageResult;
use crate::model::{Asset, LogEntry, NewAsset, NewLogEntry};

/// Access to the `assets` and `logs` tables.
///
/// Listing operations only return rows that are not soft-deleted.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Insert one asset and return the stored row with its assigned id
    async fn insert_asset(&self, asset: NewAsset) -> StorageResult<Asset>;

    /// Insert log rows, returning how many were stored
    async fn insert_logs(&self, logs: Vec<NewLogEntry>) -> StorageResult<usize>;

    /// All assets not marked deleted
    async fn list_assets(&self) -> StorageResult<Vec<Asset>>;

    /// All log rows not marked deleted
    async fn list_logs(&self) -> StorageResult<Vec<LogEntry>>;

    /// Mark every log and asset as deleted, logs first
    async fn soft_delete_all(&self) -> StorageResult<()>;

    /// Short backend name for log output
    fn backend_name(&self) -> &'static str;
}
