//! # Routes Module
//!
//! Route table and handlers for the REST surface.
//!
//! ```text
//! GET  /health              → liveness probe
//! GET  /products            → ordered catalog
//! GET  /products/{code}     → one product by business code
//! POST /purchase            → record a purchase transaction
//! GET  /transactions/{id}   → transaction with tax breakdown
//! ```

pub mod product;
pub mod purchase;
pub mod transaction;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(product::list_products))
        .route("/products/{code}", get(product::get_product))
        .route("/purchase", post(purchase::create_purchase))
        .route("/transactions/{id}", get(transaction::get_transaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Handler Tests
// =============================================================================
