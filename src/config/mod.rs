use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ErrorCode, RelibotError, Result};

pub mod loader;

pub use loader::{load_config, load_config_from};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Get the platform directory holding the global `config.toml`
pub fn get_global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "relibot", "relibot").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Overrides the `-v` derived log level when no `-v` flag is given.
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub webhook: WebhookSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Hosted REST backend connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookSettings {
    #[serde(default = "default_webhook_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extra directory searched for PDF fonts
    #[serde(default)]
    pub font_dir: Option<PathBuf>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    250
}

fn default_webhook_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            bind: default_webhook_bind(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            font_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides from an arbitrary lookup.
    pub fn merge_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.backend.url = Some(url);
        }

        if let Some(key) = lookup("SUPABASE_KEY") {
            self.backend.api_key = Some(key);
        }

        if let Some(level) = lookup("RELIBOT_LOG_LEVEL") {
            self.log_level = Some(level);
        }

        if let Some(bind) = lookup("RELIBOT_WEBHOOK_BIND") {
            self.webhook.bind = bind;
        }

        if let Some(dir) = lookup("RELIBOT_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("RELIBOT_FONT_DIR") {
            self.export.font_dir = Some(PathBuf::from(dir));
        }
    }

    /// Check settings that do not depend on which store is selected.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            if !VALID_LOG_LEVELS.contains(&level.as_str()) {
                return Err(RelibotError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!(
                        "log_level '{}' is not one of {}",
                        level,
                        VALID_LOG_LEVELS.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Backend URL and key, both required to reach the hosted tables.
    pub fn backend_credentials(&self) -> Result<(&str, &str)> {
        let url = self
            .backend
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                RelibotError::config_with_code(
                    ErrorCode::CONFIG_MISSING_REQUIRED,
                    "backend.url is not set (config file or SUPABASE_URL)",
                )
            })?;
        let key = self
            .backend
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                RelibotError::config_with_code(
                    ErrorCode::CONFIG_MISSING_REQUIRED,
                    "backend.api_key is not set (config file or SUPABASE_KEY)",
                )
            })?;
        Ok((url, key))
    }
}
