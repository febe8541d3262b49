//! # till-core: Pure Business Logic for the Till POS Backend
//!
//! This crate is the **heart** of the Till backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     REST API (apps/api)                         │   │
//! │  │    GET /products ── GET /products/{code} ── POST /purchase      │   │
//! │  │                  GET /transactions/{id}                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │  receipt  │    │   │
//! │  │   │  Product  │  │   Money   │  │  totals   │  │   tally   │    │   │
//! │  │   │ TaxClass  │  │  TaxCalc  │  │  stock    │  │ line math │    │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   till-db (Database Layer)                      │   │
//! │  │          SQLite queries, migrations, repositories               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, TaxClass, Transaction, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - Recorder math: clerk resolution, stock checks, totals
//! - [`receipt`] - Reader math: per-line breakdowns and aggregates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64), never floats
//! 4. **Truncated Tax**: Tax amounts are floored, never rounded
//! 5. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use checkout::{PurchaseItem, PurchaseTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{LineTotals, TransactionTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default aggregate tax rate in basis points (10.00%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Default store identifier stamped on every transaction.
pub const DEFAULT_STORE_CODE: &str = "00001";

/// Default terminal identifier stamped on every transaction.
pub const DEFAULT_TERMINAL_CODE: &str = "001";

/// Default tax code stamped on every line item.
///
/// Separate from [`DEFAULT_TAX_RATE_BPS`]: the rate taxes the aggregate
/// at record time, while this code is what the reader later joins back
/// to a [`types::TaxClass`].
pub const DEFAULT_TAX_CODE: &str = "10";

/// Clerk code substituted when a purchase request carries no usable
/// requester id.
pub const DEFAULT_CLERK_CODE: &str = "9999999999";
