//! # API Error Type
//!
//! Unified error type for REST handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in the API                              │
//! │                                                                         │
//! │  Client                       Rust Backend                              │
//! │  ──────                       ────────────                              │
//! │                                                                         │
//! │  POST /purchase                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Handler: Result<Json<T>, ApiError>                              │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  CoreError::ProductNotFound ────► 404 NOT_FOUND                  │   │
//! │  │  CoreError::InsufficientStock ──► 400 INSUFFICIENT_STOCK         │   │
//! │  │  CoreError::Validation ─────────► 400 VALIDATION_ERROR           │   │
//! │  │  DbError::* ────────────────────► 500 DATABASE_ERROR (generic)   │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ◄──── { "code": "NOT_FOUND", "message": "Product not found: ..." }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Caller-input problems (validation, unknown codes, short stock) keep
//! their messages; storage failures are logged in full and surfaced as a
//! generic message so internals never leak.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use till_core::CoreError;
use till_db::{CheckoutError, DbError};

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 4901234567890"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Requested quantity exceeds available stock (400)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InsufficientStock => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core (business) errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(code) => ApiError::not_found("Product", code),
            CoreError::TransactionNotFound(id) => ApiError::not_found("Transaction", id),
            CoreError::EmptyTransaction(id) => ApiError::new(
                ErrorCode::NotFound,
                format!("Transaction details not found: {}", id),
            ),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to API errors.
///
/// Storage failures are logged with detail but surfaced generically.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            err => {
                tracing::error!(error = %err, "Storage failure");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts recorder/reader errors to API errors.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Domain(e) => e.into(),
            CheckoutError::Db(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::ValidationError;

    #[test]
    fn test_product_not_found_maps_to_404() {
        let err: ApiError = CoreError::ProductNotFound("4901234567890".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product not found: 4901234567890");
    }

    #[test]
    fn test_insufficient_stock_maps_to_400() {
        let err: ApiError = CoreError::InsufficientStock {
            code: "A".to_string(),
            available: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_transaction_maps_to_404() {
        let err: ApiError = CoreError::EmptyTransaction(7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Transaction details not found: 7");
    }

    #[test]
    fn test_storage_failure_is_generic() {
        let err: ApiError = DbError::QueryFailed("syntax error near SELECT".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Internals never leak to the caller
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_checkout_error_dispatch() {
        let err: ApiError =
            CheckoutError::Domain(CoreError::TransactionNotFound(3)).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CheckoutError::Db(DbError::PoolExhausted).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
