//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, including the sale constants (store/terminal identifiers,
//! tax rate, line tax code, default clerk code) so deployments can
//! override them without recompiling.

use std::env;

use till_core::{SaleConfig, TaxRate};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Bind address (default: 0.0.0.0)
    pub bind_addr: String,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Sale constants passed into the recorder/reader
    pub sale: SaleConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = SaleConfig::default();

        let config = ApiConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "./till.db".to_string()),

            sale: SaleConfig {
                tax_rate: TaxRate::from_bps(
                    env::var("TAX_RATE_BPS")
                        .unwrap_or_else(|_| defaults.tax_rate.bps().to_string())
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("TAX_RATE_BPS".to_string()))?,
                ),
                store_code: env::var("STORE_CODE").unwrap_or(defaults.store_code),
                terminal_code: env::var("TERMINAL_CODE").unwrap_or(defaults.terminal_code),
                line_tax_code: env::var("LINE_TAX_CODE").unwrap_or(defaults.line_tax_code),
                default_clerk_code: env::var("DEFAULT_CLERK_CODE")
                    .unwrap_or(defaults.default_clerk_code),
            },
        };

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
