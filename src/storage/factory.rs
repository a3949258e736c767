//! Storage factory for creating log store instances

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::backends::{FileBackend, MemoryBackend, RestBackend};
use super::config::{BackendType, DEFAULT_DATA_FILE};
use super::traits::LogStore;
use crate::config::Config;
use crate::error::Result;

/// Factory for creating log stores
pub struct StorageFactory;

impl StorageFactory {
    /// Open the selected backend.
    ///
    /// `data_file` only applies to [`BackendType::File`]; the REST backend
    /// needs credentials from `config`.
    pub async fn open(
        backend: BackendType,
        config: &Config,
        data_file: Option<&Path>,
    ) -> Result<Arc<dyn LogStore>> {
        let store: Arc<dyn LogStore> = match backend {
            BackendType::Rest => {
                let (url, key) = config.backend_credentials()?;
                Arc::new(RestBackend::new(url, key, &config.backend)?)
            }
            BackendType::File => {
                let path = data_file.unwrap_or_else(|| Path::new(DEFAULT_DATA_FILE));
                Arc::new(FileBackend::open(path).await?)
            }
            BackendType::Memory => Arc::new(MemoryBackend::new()),
        };

        debug!("Opened {} log store", store.backend_name());
        Ok(store)
    }
}
