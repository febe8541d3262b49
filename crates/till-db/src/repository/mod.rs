//! # Repository Module
//!
//! Database repository implementations for the Till backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.   │
//! │                                                                         │
//! │  API Handler                                                            │
//! │       │                                                                 │
//! │       │  db.products().find_by_code("4901234567890")                    │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self)                                                        │
//! │  ├── find_by_code(&self, code)                                          │
//! │  └── insert(&self, ...)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                         │
//! │  • Not-found is a value (Option), never an exception path               │
//! │  • Multi-step writes stay inside Database::atomic                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog lookups and stock
//! - [`tax::TaxClassRepository`] - Tax class reference data
//! - [`transaction::TransactionRepository`] - Purchase recorder and reader

pub mod product;
pub mod tax;
pub mod transaction;
