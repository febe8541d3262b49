//! Shared application state for axum handlers.

use till_core::SaleConfig;
use till_db::Database;

/// State injected into every handler via axum's `State` extractor.
///
/// Both fields are cheap to clone: the database handle shares one pool,
/// and the sale configuration is a handful of small strings.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle (pool + repositories).
    pub db: Database,

    /// Sale constants passed into the recorder/reader.
    pub sale: SaleConfig,
}

impl AppState {
    /// Creates the application state.
    pub fn new(db: Database, sale: SaleConfig) -> Self {
        AppState { db, sale }
    }
}
