//! # Till API
//!
//! REST server for the Till point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           API Server                                    │
//! │                                                                         │
//! │  Client ───► HTTP (8000) ───► Handlers ───► till-db ───► SQLite         │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                               till-core                                 │
//! │                           (pure business math)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;
mod state;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ApiConfig;
use crate::state::AppState;
use till_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Till API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path,
        store = %config.sale.store_code,
        terminal = %config.sale.terminal_code,
        "Configuration loaded"
    );

    // Connect to the database; migrations run on connect
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite");

    // Build the router
    let state = AppState::new(db.clone(), config.sale.clone());
    let app = routes::router(state);

    // Bind and serve
    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database");
    db.close().await;

    Ok(())
}

/// Completes when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
