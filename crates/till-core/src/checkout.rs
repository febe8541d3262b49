//! # Checkout Module
//!
//! Pure purchase math for the transaction recorder: requester id
//! resolution, stock checks, and total/tax computation.
//!
//! ## Recorder Flow (storage steps live in till-db)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /purchase { requesterId?, items }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_clerk_code() ─── blank/missing → configured default            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per item: look up product, check_stock(), accumulate subtotal          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_totals() ─── tax = floor(pre-tax × rate), total = sum + tax    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  header + lines + stock decrement, one atomic unit (till-db)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, TaxRate};

// =============================================================================
// Purchase Input
// =============================================================================

/// One requested purchase item: a product business code and a quantity.
///
/// Order matters - line items are numbered in the order items arrive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub product_code: String,
    pub quantity: i64,
}

// =============================================================================
// Purchase Totals
// =============================================================================

/// Aggregate amounts for a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTotals {
    /// Sum of line subtotals, before tax.
    pub excl_tax: Money,

    /// Tax on the pre-tax total, truncated.
    pub tax: Money,

    /// Pre-tax total plus tax.
    pub incl_tax: Money,
}

// =============================================================================
// Pure Operations
// =============================================================================

/// Resolves the clerk code for a purchase.
///
/// An absent, empty, or whitespace-only requester id is replaced by the
/// configured default, verbatim. Anything else passes through unchanged
/// (no trimming of usable values).
///
/// ## Example
/// ```rust
/// use till_core::checkout::resolve_clerk_code;
///
/// assert_eq!(resolve_clerk_code(None, "9999999999"), "9999999999");
/// assert_eq!(resolve_clerk_code(Some("   "), "9999999999"), "9999999999");
/// assert_eq!(resolve_clerk_code(Some("E001"), "9999999999"), "E001");
/// ```
pub fn resolve_clerk_code(requested: Option<&str>, default: &str) -> String {
    match requested {
        Some(code) if !code.trim().is_empty() => code.to_string(),
        _ => default.to_string(),
    }
}

/// Checks that a product has enough stock for the requested quantity.
///
/// ## Errors
/// `CoreError::InsufficientStock` with the product code, units available
/// and units requested.
pub fn check_stock(product: &Product, requested: i64) -> CoreResult<()> {
    if product.stock < requested {
        return Err(CoreError::InsufficientStock {
            code: product.code.clone(),
            available: product.stock,
            requested,
        });
    }
    Ok(())
}

/// Computes the purchase totals from line subtotals.
///
/// The tax amount is `floor(pre_tax_total × rate)` - truncation is the
/// defined policy, applied once to the aggregate (not per line).
///
/// ## Example
/// ```rust
/// use till_core::checkout::compute_totals;
/// use till_core::money::Money;
/// use till_core::types::TaxRate;
///
/// let subtotals = [Money::from_cents(300), Money::from_cents(99)];
/// let totals = compute_totals(&subtotals, TaxRate::from_bps(1000));
/// assert_eq!(totals.excl_tax.cents(), 399);
/// assert_eq!(totals.tax.cents(), 39); // floor(39.9)
/// assert_eq!(totals.incl_tax.cents(), 438);
/// ```
pub fn compute_totals(line_subtotals: &[Money], rate: TaxRate) -> PurchaseTotals {
    let mut excl_tax = Money::zero();
    for subtotal in line_subtotals {
        excl_tax += *subtotal;
    }

    let tax = excl_tax.tax_truncated(rate);

    PurchaseTotals {
        excl_tax,
        tax,
        incl_tax: excl_tax + tax,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
