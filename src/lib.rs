//! # relibot
//!
//! Reliability reporting over asset failure and repair logs: upload event
//! spreadsheets, compute MTBF/MTTR per asset, rank failure modes and export
//! xlsx, PDF, Markdown or JSON reports.
//!
//! ## Usage
//!
//! ```bash
//! relibot upload events.csv --yes
//! relibot stats [--asset NAME] [--from DATE] [--to DATE]
//! relibot export --format pdf
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, startup and fatal error handling
//! - `cli` - Argument parsing and command handlers
//! - `config` - File and environment configuration
//! - `error` - Unified error type with numeric codes
//! - `filter` - Asset-name and date-range narrowing of logs
//! - `ingest` - CSV uploads and timestamp parsing
//! - `model` - Assets, log entries and event records
//! - `report` - Report assembly and exporters
//! - `stats` - MTBF/MTTR calculator and failure-mode Pareto
//! - `storage` - Log store trait with REST, file and memory backends
//! - `upload` - Persisting parsed uploads
//! - `webhook` - HTTP receiver for backend notifications
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod report;
pub mod stats;
pub mod storage;
pub mod upload;
pub mod webhook;

pub use error::{RelibotError, Result};
