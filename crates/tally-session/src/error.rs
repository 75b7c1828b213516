//! # Session Error Types
//!
//! Errors raised around the pure core: storage, configuration, and the
//! operator-facing shape every failure is reported in.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (tally-core)    StoreError        ConfigError                │
//! │       │                        │                  │                     │
//! │       └────────────┬───────────┴──────────────────┘                     │
//! │                    ▼                                                    │
//! │             SessionError (this module)                                  │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ApiError { code, message } ← Serialized for the rendering front end   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tally_core::{CoreError, ErrorKind, ValidationError};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Store Error
// =============================================================================

/// Failures of the storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the state file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full during the temp-file write
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but is not valid back-office JSON.
    #[error("State file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// State could not be encoded for writing.
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Session Error
// =============================================================================

/// Everything a session operation can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Core(CoreError::Validation(err))
    }
}

/// Convenience type alias for session results.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// API Error
// =============================================================================

/// Error shape handed to the rendering front end.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Sale not found: 1714555800000"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApiError {
    /// Machine-readable code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes for the front end.
///
/// `MISSING_INPUT` is shown as a blocking prompt; everything else is a
/// dismissible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// A required input is absent
    MissingInput,

    /// An input is present but rejected
    InvalidInput,

    /// Referenced sale does not exist
    NotFound,

    /// Position outside a list
    OutOfRange,

    /// The storage collaborator failed
    StorageError,

    /// Configuration could not be loaded
    ConfigError,
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::MissingInput => ErrorCode::MissingInput,
            ErrorKind::InvalidInput => ErrorCode::InvalidInput,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::OutOfRange => ErrorCode::OutOfRange,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = match &err {
            CoreError::Validation(inner) => inner.to_string(),
            other => other.to_string(),
        };
        ApiError::new(err.kind().into(), message)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Core(e) => e.into(),
            SessionError::Store(e) => {
                // Log the real cause; the operator gets a generic message
                tracing::error!(error = %e, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, "Back-office data could not be read or saved")
            }
            SessionError::Config(e) => ApiError::new(ErrorCode::ConfigError, e.to_string()),
        }
    }
}
