use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::ErrorCode;

/// The unified error type for relibot
#[derive(Error, Debug)]
pub enum RelibotError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Ingestion error: {message}")]
    Ingest {
        code: u16,
        message: String,
        line: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Export error: {message}")]
    Export {
        code: u16,
        message: String,
        format: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RelibotError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an ingestion error with specific code and source line
    pub fn ingest_with_code(code: u16, message: impl Into<String>, line: Option<u64>) -> Self {
        Self::Ingest {
            code,
            message: message.into(),
            line,
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create an export error with specific code and format name
    pub fn export_with_code(
        code: u16,
        message: impl Into<String>,
        format: Option<String>,
    ) -> Self {
        Self::Export {
            code,
            message: message.into(),
            format,
            source: None,
        }
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Ingest { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Export { source: src, .. }
            | Self::Validation { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Ingest { message, .. }
            | Self::Storage { message, .. }
            | Self::Export { message, .. }
            | Self::Validation { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Ingest { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Export { .. } => 5,
            Self::Validation { .. } => 8,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Ingest { code, .. }
            | Self::Storage { code, .. }
            | Self::Export { code, .. }
            | Self::Validation { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Ingest { message, line, .. } => match line {
                Some(line) => format!("Upload failed at line {}: {}", line, message),
                None => format!("Upload failed: {}", message),
            },
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Storage error at {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Export {
                message, format, ..
            } => {
                if let Some(f) = format {
                    format!("{} export failed: {}", f, message)
                } else {
                    format!("Export failed: {}", message)
                }
            }
            Self::Validation { message, field, .. } => {
                if let Some(f) = field {
                    format!("Validation error for '{}': {}", f, message)
                } else {
                    format!("Validation error: {}", message)
                }
            }
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        out
    }

    /// Check if this is a transient error worth retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Storage { code, .. } if *code == ErrorCode::STORAGE_TEMPORARY)
    }
}

/// Type alias for Results using RelibotError
pub type Result<T> = std::result::Result<T, RelibotError>;

impl From<std::io::Error> for RelibotError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            ErrorKind::AlreadyExists => (ErrorCode::STORAGE_ALREADY_EXISTS, "Already exists"),
            ErrorKind::InvalidInput => {
                return RelibotError::validation_with_code(
                    ErrorCode::VALIDATION_INVALID_INPUT,
                    "Invalid input",
                    None,
                )
                .with_source(err)
            }
            ErrorKind::InvalidData => {
                return RelibotError::validation_with_code(
                    ErrorCode::VALIDATION_INVALID_DATA,
                    "Invalid data",
                    None,
                )
                .with_source(err)
            }
            ErrorKind::TimedOut | ErrorKind::Interrupted | ErrorKind::WouldBlock => {
                (ErrorCode::STORAGE_TEMPORARY, "Resource temporarily unavailable")
            }
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        RelibotError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<serde_json::Error> for RelibotError {
    fn from(err: serde_json::Error) -> Self {
        RelibotError::validation_with_code(
            ErrorCode::VALIDATION_INVALID_FORMAT,
            "Invalid JSON",
            None,
        )
        .with_source(err)
    }
}

impl From<toml::de::Error> for RelibotError {
    fn from(err: toml::de::Error) -> Self {
        RelibotError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}

impl From<csv::Error> for RelibotError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        RelibotError::ingest_with_code(ErrorCode::INGEST_MALFORMED_CSV, "Malformed CSV", line)
            .with_source(err)
    }
}

impl From<reqwest::Error> for RelibotError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() || err.is_connect() {
            ErrorCode::STORAGE_TEMPORARY
        } else {
            ErrorCode::STORAGE_BACKEND_ERROR
        };
        RelibotError::storage_with_code(code, "Backend request failed", None).with_source(err)
    }
}

impl From<crate::storage::error::StorageError> for RelibotError {
    fn from(err: crate::storage::error::StorageError) -> Self {
        use crate::storage::error::StorageError;

        match err {
            StorageError::Io(io_err) => RelibotError::from(io_err),
            StorageError::Http(http_err) => RelibotError::from(http_err),
            StorageError::Status { status, body } => {
                let code = if status == 401 || status == 403 {
                    ErrorCode::STORAGE_UNAUTHORIZED
                } else if status >= 500 || status == 429 {
                    ErrorCode::STORAGE_TEMPORARY
                } else {
                    ErrorCode::STORAGE_BACKEND_ERROR
                };
                RelibotError::storage_with_code(
                    code,
                    format!("Backend responded with HTTP {}: {}", status, body),
                    None,
                )
            }
            StorageError::Serialization(msg) => RelibotError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                msg,
                None,
            ),
            StorageError::NotFound(msg) => {
                RelibotError::storage_with_code(ErrorCode::STORAGE_NOT_FOUND, msg, None)
            }
            StorageError::Configuration(msg) => {
                RelibotError::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, msg)
            }
        }
    }
}
