//! # till-db: Database Layer for the Till POS Backend
//!
//! This crate provides database access for the Till backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Data Flow                                 │
//! │                                                                         │
//! │  API Handler (POST /purchase)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     till-db (THIS CRATE)                        │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │ (product.rs,  │    │  (embedded)  │    │    │
//! │  │   │               │    │  tax.rs,      │    │              │    │    │
//! │  │   │ SqlitePool    │◄───│  transaction  │    │ 001_init.sql │    │    │
//! │  │   │ Atomic units  │    │  .rs)         │    │ 002_tax.sql  │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL mode)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, configuration, atomic units
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and checkout error types
//! - [`repository`] - Repository implementations (product, tax, transaction)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use till_db::{Database, DbConfig};
//! use till_core::SaleConfig;
//!
//! let db = Database::new(DbConfig::new("path/to/till.db")).await?;
//!
//! let products = db.products().list().await?;
//! let recorded = db
//!     .transactions()
//!     .record_purchase(&SaleConfig::default(), Some("E001"), &items)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CheckoutError, CheckoutResult, DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::tax::TaxClassRepository;
pub use repository::transaction::TransactionRepository;
