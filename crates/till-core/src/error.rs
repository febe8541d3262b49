//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                           │
//! │  ├── CoreError        - Business rule / lookup failures                 │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  till-db errors (separate crate)                                        │
//! │  ├── DbError          - Database operation failures                     │
//! │  └── CheckoutError    - CoreError | DbError for mixed operations        │
//! │                                                                         │
//! │  API errors (in app)                                                    │
//! │  └── ApiError         - What callers see (status + JSON body)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → ApiError → HTTP    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product code, id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a caller-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations or expected lookup misses.
/// They are caller-input problems, distinct from storage failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with the given business code exists.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Purchase asks for more units than are on hand.
    ///
    /// ## When This Occurs
    /// - A purchase item's quantity exceeds the product's stock
    /// - A concurrent purchase took the remaining units first
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// No transaction with the given id exists.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(i64),

    /// The transaction exists but has no line items joined to a tax class.
    ///
    /// Kept as an error rather than a valid empty result; the read
    /// endpoint reports it as not-found.
    #[error("Transaction {0} has no line items")]
    EmptyTransaction(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements.
/// Detected before any storage access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "4901234567890".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 4901234567890: available 3, requested 5"
        );

        let err = CoreError::ProductNotFound("0000000000000".to_string());
        assert_eq!(err.to_string(), "Product not found: 0000000000000");

        let err = CoreError::TransactionNotFound(42);
        assert_eq!(err.to_string(), "Transaction not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
