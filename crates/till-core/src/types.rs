//! # Domain Types
//!
//! Core domain types used throughout the Till backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │   Transaction   │   │ TransactionLine │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (i64)       │   │  id (i64)       │   │  transaction_id │        │
//! │  │  code (business)│   │  clerk_code     │   │  line_no (1..N) │        │
//! │  │  name           │   │  store_code     │   │  product snap   │        │
//! │  │  unit_price     │   │  total_cents    │   │  quantity       │        │
//! │  │  stock          │   │  excl-tax total │   │  tax_code       │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    TaxRate      │   │    TaxClass     │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  bps (u32)      │   │  code ("10")    │                              │
//! │  │  1000 = 10%     │   │  rate_bps       │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Persisted entities carry:
//! - `id`: storage-assigned i64 surrogate - immutable, used for relations
//! - Business key: (product code, tax code) - caller-facing lookup key

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{
    DEFAULT_CLERK_CODE, DEFAULT_STORE_CODE, DEFAULT_TAX_CODE, DEFAULT_TAX_RATE_BPS,
    DEFAULT_TERMINAL_CODE,
};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10.00%, the fixed consumption rate this system applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Storage-assigned surrogate id.
    pub id: i64,

    /// Business code - the caller-facing unique key. Exact match only,
    /// case-sensitive, no normalization.
    pub code: String,

    /// Display name shown on receipts.
    pub name: String,

    /// Unit price in minor currency units.
    pub unit_price_cents: i64,

    /// Units on hand. Never negative.
    pub stock: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Tax Class
// =============================================================================

/// A tax classification keyed by code.
///
/// Read-only reference data to this subsystem; rows are seeded by
/// migration and joined by `TransactionLine::tax_code` on reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TaxClass {
    /// Tax code business key (e.g. "10").
    pub code: String,

    /// Rate in basis points (1000 = 10.00%).
    pub rate_bps: i64,
}

impl TaxClass {
    /// Returns the rate as a TaxRate.
    #[inline]
    pub fn rate(&self) -> TaxRate {
        TaxRate::from_bps(self.rate_bps as u32)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A recorded purchase transaction header.
///
/// Created exactly once per purchase call; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    /// Storage-assigned surrogate id.
    pub id: i64,

    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,

    /// Clerk (requester) code; the configured default when the request
    /// omitted one.
    pub clerk_code: String,

    /// Store identifier (configuration constant).
    pub store_code: String,

    /// Terminal identifier (configuration constant).
    pub terminal_code: String,

    /// Total amount including tax, minor units.
    pub total_cents: i64,

    /// Total amount excluding tax, minor units.
    pub total_excl_tax_cents: i64,
}

// =============================================================================
// Transaction Line
// =============================================================================

/// A line item of a transaction.
///
/// Identity is composite: (transaction_id, line_no) with line_no starting
/// at 1 in input order. Product fields are a point-in-time snapshot so
/// history is unaffected by later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionLine {
    /// Owning transaction.
    pub transaction_id: i64,

    /// Per-transaction sequence number, 1..N in input order.
    pub line_no: i64,

    /// Product surrogate id at time of sale.
    pub product_id: i64,

    /// Product code at time of sale (frozen).
    pub product_code: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Unit price in minor units at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Quantity purchased.
    pub quantity: i64,

    /// Applied tax code (configuration constant, not looked up per product).
    pub tax_code: String,
}

impl TransactionLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line subtotal before tax (unit price × quantity).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Recorded Purchase
// =============================================================================

/// The recorder's output: a persisted transaction plus its ordered lines,
/// all carrying freshly assigned identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedPurchase {
    pub transaction: Transaction,
    pub lines: Vec<TransactionLine>,
}

// =============================================================================
// Configuration Types
// =============================================================================

/// Immutable sale configuration passed explicitly into the transaction
/// recorder and reader.
///
/// Replaces ambient globals: the aggregate tax rate, the fixed store and
/// terminal identifiers, the tax code stamped on every line, and the
/// clerk code substituted for blank requester ids all live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleConfig {
    /// Aggregate tax rate applied to the pre-tax total.
    pub tax_rate: TaxRate,

    /// Store identifier stamped on every transaction.
    pub store_code: String,

    /// Terminal identifier stamped on every transaction.
    pub terminal_code: String,

    /// Tax code stamped on every line item. A configured constant,
    /// separate from `tax_rate`; the reader joins it back to a TaxClass.
    pub line_tax_code: String,

    /// Clerk code substituted when the request has no usable requester id.
    pub default_clerk_code: String,
}

impl Default for SaleConfig {
    fn default() -> Self {
        SaleConfig {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            store_code: DEFAULT_STORE_CODE.to_string(),
            terminal_code: DEFAULT_TERMINAL_CODE.to_string(),
            line_tax_code: DEFAULT_TAX_CODE.to_string(),
            default_clerk_code: DEFAULT_CLERK_CODE.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(10.0);
        assert_eq!(rate.bps(), 1000);
    }

    #[test]
    fn test_tax_class_rate() {
        let class = TaxClass {
            code: "10".to_string(),
            rate_bps: 1000,
        };
        assert_eq!(class.rate(), TaxRate::from_bps(1000));
    }

    #[test]
    fn test_line_subtotal() {
        let line = TransactionLine {
            transaction_id: 1,
            line_no: 1,
            product_id: 7,
            product_code: "4901234567890".to_string(),
            product_name: "Green Tea 500ml".to_string(),
            unit_price_cents: 150,
            quantity: 3,
            tax_code: "10".to_string(),
        };
        assert_eq!(line.subtotal().cents(), 450);
    }

    #[test]
    fn test_sale_config_defaults() {
        let cfg = SaleConfig::default();
        assert_eq!(cfg.tax_rate.bps(), 1000);
        assert_eq!(cfg.store_code, "00001");
        assert_eq!(cfg.terminal_code, "001");
        assert_eq!(cfg.line_tax_code, "10");
        assert_eq!(cfg.default_clerk_code, "9999999999");
    }
}
