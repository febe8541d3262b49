//! # Validation Module
//!
//! Input validation for purchase requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP deserialization (serde)                                  │
//! │  └── Type/shape checks (strings, integers, arrays)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Business input rules, before any storage access                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  └── NOT NULL, UNIQUE, FK, CHECK (stock >= 0) constraints               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown product codes are NOT an input error here - they resolve to a
//! not-found outcome during recording. Likewise an empty items list is
//! accepted and records an empty transaction.

use crate::checkout::PurchaseItem;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-3).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the items of a purchase request.
///
/// Each item's quantity must be positive. The list itself may be empty.
pub fn validate_purchase_items(items: &[PurchaseItem]) -> ValidationResult<()> {
    for item in items {
        validate_quantity(item.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, qty: i64) -> PurchaseItem {
        PurchaseItem {
            product_code: code.to_string(),
            quantity: qty,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_purchase_items() {
        assert!(validate_purchase_items(&[item("A", 1), item("B", 2)]).is_ok());
        assert!(validate_purchase_items(&[item("A", 1), item("B", 0)]).is_err());
    }

    #[test]
    fn test_empty_items_accepted() {
        assert!(validate_purchase_items(&[]).is_ok());
    }
}
