//! # CLI Error Type
//!
//! Unified error type for the terminal front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in pocketcalc-cli                         │
//! │                                                                         │
//! │  Startup                          Per input line                        │
//! │  ───────                          ──────────────                        │
//! │  ConfigError ──► AppError ──►     UnknownKey ──► reported, line         │
//! │  main() exits (anyhow)            skipped, session continues            │
//! │                                                                         │
//! │  Arithmetic problems never show up here: the engine turns them into     │
//! │  its own error display.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Output
//! In JSON mode a rejected line is reported on stdout as:
//! ```json
//! { "code": "UNKNOWN_KEY", "message": "Unknown key: \"q\"" }
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// A token that maps to no button or keyboard shortcut.
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the display as JSON failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// Machine-readable error codes for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownKey,
    ConfigError,
    IoError,
    Internal,
}

/// Serializable error report (JSON mode).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

impl AppError {
    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::UnknownKey(_) => ErrorCode::UnknownKey,
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Serialization(_) => ErrorCode::Internal,
        }
    }

    /// Whether the session can carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::UnknownKey(_))
    }
}

impl From<&AppError> for ErrorReport {
    fn from(err: &AppError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}
