//! In-memory log store for tests and dry runs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ingest::timestamp::parse_event_time;
use crate::model::{Asset, EventTime, LogEntry, NewAsset, NewLogEntry, RecordId};
use crate::storage::{
    error::{StorageError, StorageResult},
    traits::LogStore,
};

/// Contents of both tables, including soft-deleted rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    pub assets: Vec<Asset>,
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub next_id: u64,
}

impl Tables {
    fn allocate_id(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId::from(self.next_id)
    }
}

/// In-memory log store with sequential integer ids
#[derive(Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously captured tables
    pub fn from_tables(tables: Tables) -> Self {
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Copy of both tables, deleted rows included
    pub async fn snapshot(&self) -> Tables {
        self.tables.read().await.clone()
    }
}

#[async_trait]
impl LogStore for MemoryBackend {
    async fn insert_asset(&self, asset: NewAsset) -> StorageResult<Asset> {
        let mut tables = self.tables.write().await;
        let stored = Asset {
            id: tables.allocate_id(),
            name: asset.name,
            category: asset.category,
            location: asset.location,
            deleted: asset.deleted,
        };
        tables.assets.push(stored.clone());
        Ok(stored)
    }

    async fn insert_logs(&self, logs: Vec<NewLogEntry>) -> StorageResult<usize> {
        let mut tables = self.tables.write().await;

        // Reject the whole batch on a dangling reference, like a foreign key would.
        if let Some(orphan) = logs
            .iter()
            .find(|log| !tables.assets.iter().any(|a| a.id == log.asset_id))
        {
            return Err(StorageError::not_found(format!(
                "asset {} referenced by log entry",
                orphan.asset_id
            )));
        }

        let count = logs.len();
        for log in logs {
            let event_time = match parse_event_time(&log.event_time) {
                Some(ts) => EventTime::Parsed(ts),
                None => EventTime::Raw(log.event_time),
            };
            let entry = LogEntry {
                id: Some(tables.allocate_id()),
                asset_id: log.asset_id,
                event_type: log.event_type,
                event_time,
                failure_mode: log.failure_mode,
                description: log.description,
                deleted: log.deleted,
            };
            tables.logs.push(entry);
        }
        Ok(count)
    }

    async fn list_assets(&self) -> StorageResult<Vec<Asset>> {
        let tables = self.tables.read().await;
        Ok(tables.assets.iter().filter(|a| !a.deleted).cloned().collect())
    }

    async fn list_logs(&self) -> StorageResult<Vec<LogEntry>> {
        let tables = self.tables.read().await;
        Ok(tables.logs.iter().filter(|l| !l.deleted).cloned().collect())
    }

    async fn soft_delete_all(&self) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        tables.logs.iter_mut().for_each(|l| l.deleted = true);
        tables.assets.iter_mut().for_each(|a| a.deleted = true);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetId, EventType};

    fn new_log(asset_id: &AssetId, when: &str) -> NewLogEntry {
        NewLogEntry {
            asset_id: asset_id.clone(),
            event_type: EventType::Failure,
            event_time: when.to_string(),
            failure_mode: "jam".into(),
            description: String::new(),
            deleted: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryBackend::new();
        let press = store
            .insert_asset(NewAsset::new("Press", "Machine", "Line 1"))
            .await
            .unwrap();
        let fan = store
            .insert_asset(NewAsset::new("Fan", "HVAC", "Roof"))
            .await
            .unwrap();
        assert_ne!(press.id, fan.id);

        let inserted = store
            .insert_logs(vec![
                new_log(&press.id, "2024-01-01T00:00:00+00:00"),
                new_log(&fan.id, "2024-01-02T00:00:00+00:00"),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let logs = store.list_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.id.is_some()));
        assert!(matches!(logs[0].event_time, EventTime::Parsed(_)));
        assert_eq!(store.list_assets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_orphan_logs_are_rejected() {
        let store = MemoryBackend::new();
        let err = store
            .insert_logs(vec![new_log(&AssetId::from("99"), "2024-01-01")])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert!(store.list_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_hides_rows_but_keeps_them() {
        let store = MemoryBackend::new();
        let asset = store
            .insert_asset(NewAsset::new("Press", "", ""))
            .await
            .unwrap();
        store
            .insert_logs(vec![new_log(&asset.id, "2024-01-01T00:00:00Z")])
            .await
            .unwrap();

        store.soft_delete_all().await.unwrap();

        assert!(store.list_assets().await.unwrap().is_empty());
        assert!(store.list_logs().await.unwrap().is_empty());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.assets.len(), 1);
        assert!(snapshot.logs[0].deleted);
    }
}
