//! JSON snapshot log store
//!
//! Keeps both tables in memory and rewrites a single JSON file after every
//! mutation. Meant for offline use and tests, not concurrent writers.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::memory::{MemoryBackend, Tables};
use crate::model::{Asset, LogEntry, NewAsset, NewLogEntry};
use crate::storage::{error::StorageResult, traits::LogStore};

pub struct FileBackend {
    path: PathBuf,
    inner: MemoryBackend,
}

impl FileBackend {
    /// Open the snapshot at `path`, starting empty if it does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let tables = if fs::try_exists(&path).await? {
            let content = fs::read(&path).await?;
            serde_json::from_slice::<Tables>(&content)?
        } else {
            debug!("No snapshot at {}, starting empty", path.display());
            Tables::default()
        };

        Ok(Self {
            path,
            inner: MemoryBackend::from_tables(tables),
        })
    }

    async fn persist(&self) -> StorageResult<()> {
        let snapshot = self.inner.snapshot().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Write-then-rename keeps the snapshot whole.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&snapshot)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl LogStore for FileBackend {
    async fn insert_asset(&self, asset: NewAsset) -> StorageResult<Asset> {
        let stored = self.inner.insert_asset(asset).await?;
        self.persist().await?;
        Ok(stored)
    }

    async fn insert_logs(&self, logs: Vec<NewLogEntry>) -> StorageResult<usize> {
        let count = self.inner.insert_logs(logs).await?;
        self.persist().await?;
        Ok(count)
    }

    async fn list_assets(&self) -> StorageResult<Vec<Asset>> {
        self.inner.list_assets().await
    }

    async fn list_logs(&self) -> StorageResult<Vec<LogEntry>> {
        self.inner.list_logs().await
    }

    async fn soft_delete_all(&self) -> StorageResult<()> {
        self.inner.soft_delete_all().await?;
        self.persist().await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("relibot.json");

        let store = FileBackend::open(&path).await.unwrap();
        store
            .insert_asset(NewAsset::new("Press", "Machine", "Line 1"))
            .await
            .unwrap();
        assert!(path.exists());

        let reopened = FileBackend::open(&path).await.unwrap();
        let assets = reopened.list_assets().await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].name, "Press");

        // Ids keep counting from the stored high-water mark.
        let second = reopened
            .insert_asset(NewAsset::new("Fan", "", ""))
            .await
            .unwrap();
        assert_eq!(second.id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relibot.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(FileBackend::open(&path).await.is_err());
    }
}
