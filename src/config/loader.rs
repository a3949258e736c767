use std::path::{Path, PathBuf};
use tracing::debug;

use super::{get_global_config_dir, Config};
use crate::error::{ErrorCode, RelibotError, Result};

/// Project-local config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "relibot.toml";

/// Load configuration from the first available file, then apply
/// environment overrides.
///
/// Lookup order: `explicit` (must exist), `./relibot.toml`, then
/// `config.toml` in the platform config directory. No file is fine.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(RelibotError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    format!("Configuration file not found: {}", path.display()),
                ));
            }
            Some(path.to_path_buf())
        }
        None => discover_config_file(),
    };

    let mut config = match path {
        Some(path) => load_config_from(&path)?,
        None => {
            debug!("No configuration file found, using defaults");
            Config::new()
        }
    };

    config.merge_env_vars();
    config.validate()?;
    Ok(config)
}

/// Parse a single TOML configuration file without environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| RelibotError::from(e).with_context(path.display()))?;
    toml::from_str(&content).map_err(|e| RelibotError::from(e).with_context(path.display()))
}

fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(PROJECT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    get_global_config_dir()
        .map(|dir| dir.join("config.toml"))
        .filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relibot.toml");
        fs::write(
            &path,
            r#"
log_level = "warn"

[backend]
url = "https://example.supabase.co"
api_key = "service-key"
max_retries = 5

[export]
output_dir = "reports"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.backend.max_retries, 5);
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.export.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[backend\nurl = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
    }
}
