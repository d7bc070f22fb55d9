//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Stock rule violations                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the menu prints                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → CliError → Console      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Stock rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Insufficient stock to complete a stock-out.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock OUT (qty: 15)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 10, requested: 15 }
    ///      │
    ///      ▼
    /// Menu shows: "Not enough stock for product 1: available 10, requested 15"
    /// ```
    #[error("Not enough stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before anything touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be 0 or greater")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A referenced entity does not exist (e.g., unknown supplier id).
    #[error("{entity} {id} does not exist")]
    UnknownReference { entity: String, id: i64 },
}

impl ValidationError {
    /// Creates an UnknownReference error for a given entity type and ID.
    pub fn unknown_reference(entity: impl Into<String>, id: i64) -> Self {
        ValidationError::UnknownReference {
            entity: entity.into(),
            id,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
