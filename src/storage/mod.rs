//! Storage abstraction layer for asset and log tables
//!
//! All backends implement [`LogStore`]. Rows are never removed; clearing
//! marks them deleted and listings skip them.

pub mod backends;
pub mod config;
pub mod error;
pub mod factory;
pub mod traits;

pub use backends::{FileBackend, MemoryBackend, RestBackend};
pub use config::{BackendType, DEFAULT_DATA_FILE};
pub use error::{StorageError, StorageResult};
pub use factory::StorageFactory;
pub use traits::LogStore;
