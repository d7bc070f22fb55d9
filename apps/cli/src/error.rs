//! # CLI Error Handling
//!
//! What the user sees when an operation fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Error Flow                                     │
//! │                                                                         │
//! │  Menu action / one-shot command                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<T, DbError>                                                     │
//! │         │                                                               │
//! │         ├── Validation        ─► VALIDATION_ERROR   (message as-is)    │
//! │         ├── NotFound          ─► NOT_FOUND          (message as-is)    │
//! │         ├── InsufficientStock ─► INSUFFICIENT_STOCK (message as-is)    │
//! │         └── anything else     ─► STORAGE_ERROR      (logged + cause)   │
//! │                                                                         │
//! │  Menu prints "⚠ {message}" and returns to the menu.                    │
//! │  `--json` commands print {"code": "...", "message": "..."}.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_db::{DbError, ErrorKind};

/// A user-facing error: a stable code plus a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for `--json` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input rejected (bad value or unknown supplier)
    ValidationError,

    /// Product doesn't exist
    NotFound,

    /// Stock-out larger than stock on hand
    InsufficientStock,

    /// The database failed
    StorageError,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err.kind() {
            ErrorKind::Validation => CliError::new(ErrorCode::ValidationError, err.to_string()),
            ErrorKind::NotFound => CliError::new(ErrorCode::NotFound, err.to_string()),
            ErrorKind::InsufficientStock => {
                CliError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            ErrorKind::Storage => {
                // Logged, and shown with its underlying cause
                tracing::error!(error = %err, "Database operation failed");
                CliError::new(
                    ErrorCode::StorageError,
                    format!("Database operation failed: {err}"),
                )
            }
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}
