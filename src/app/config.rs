//! Application configuration
//!
//! Process-level settings derived from the command line, as opposed to the
//! file-backed [`crate::config::Config`].

use anyhow::Result;
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Working directory
    pub working_dir: PathBuf,
    /// Level from the config file, used when no `-v` is given
    pub configured_level: Option<String>,
}

impl AppConfig {
    /// Create a new application configuration
    pub fn new(verbose: u8) -> Result<Self> {
        let working_dir = std::env::current_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get current directory: {}", e))?;

        Ok(Self {
            verbose,
            working_dir,
            configured_level: None,
        })
    }

    pub fn with_configured_level(mut self, level: Option<String>) -> Self {
        self.configured_level = level;
        self
    }

    /// Get the log filter string based on verbosity
    pub fn log_level(&self) -> &str {
        match self.verbose {
            0 => self.configured_level.as_deref().unwrap_or("info"),
            1 => "debug",
            2 => "trace",
            _ => "trace,hyper=debug,reqwest=debug",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            working_dir: PathBuf::from("."),
            configured_level: None,
        }
    }
}
