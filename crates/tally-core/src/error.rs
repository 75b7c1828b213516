//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Lookups and positional failures                │
//! │  └── ValidationError  - Operator input failures                        │
//! │                                                                         │
//! │  tally-session errors (separate crate)                                 │
//! │  └── SessionError     - Core + storage + config failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → ApiError → UI      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! Every error belongs to one [`ErrorKind`]. Numeric parse failures are NOT
//! errors anywhere in this crate: unreadable money and quantities are zero
//! (see [`crate::lenient`]).

use thiserror::Error;

use crate::types::SaleId;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification shared by every error in the system.
///
/// The rendering front end decides how to present a failure from this alone:
/// `MissingInput` is a blocking prompt, the others are dismissible notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required operator input is absent.
    MissingInput,
    /// An operator input is present but unacceptable.
    InvalidInput,
    /// A referenced record does not exist.
    NotFound,
    /// A positional reference lies outside its collection.
    OutOfRange,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of these are local and recoverable: the operation is rejected and no
/// state has changed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale cannot be found.
    ///
    /// ## When This Occurs
    /// - Void requested for an id that was never recorded
    /// - Void requested twice for the same receipt (the first one removed it)
    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    /// Expense index does not exist in the ledger.
    #[error("Expense index {index} out of range (ledger has {len} entries)")]
    ExpenseOutOfRange { index: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::SaleNotFound(_) => ErrorKind::NotFound,
            CoreError::ExpenseOutOfRange { .. } => ErrorKind::OutOfRange,
            CoreError::Validation(e) => e.kind(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Validation always runs before any mutation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field is present but blank after trimming.
    #[error("{field} must not be blank")]
    Blank { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::MissingInput,
            _ => ErrorKind::InvalidInput,
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
