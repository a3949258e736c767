//! Domain types shared by ingestion, storage, statistics and reports.

mod asset;
mod event;
mod id;

pub use asset::{Asset, NewAsset};
pub use event::{EventRecord, EventTime, EventType, LogEntry, NewLogEntry};
pub use id::{AssetId, LogId, RecordId};
