//! Upload ingestion: spreadsheet parsing and timestamp coercion.

pub mod csv_upload;
pub mod timestamp;

pub use csv_upload::{load_upload, parse_upload, UploadBatch, UploadRow};
pub use timestamp::parse_event_time;
