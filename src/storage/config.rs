//! Backend selection

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default snapshot path for the file backend
pub const DEFAULT_DATA_FILE: &str = "relibot-data.json";

/// Log store backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Hosted tables over REST (default)
    #[default]
    Rest,
    /// Local JSON snapshot
    File,
    /// Process memory, gone on exit
    Memory,
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rest => "rest",
            Self::File => "file",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}
