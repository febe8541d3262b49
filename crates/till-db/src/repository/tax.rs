//! # Tax Class Repository
//!
//! Lookup of tax classes by code.
//!
//! Tax classes are read-only reference data to the rest of the system:
//! the standard class is seeded by migration, and the reader joins line
//! items back to it by their stored tax code. `upsert` exists for seed
//! tooling and tests only.

use sqlx::SqlitePool;

use crate::error::DbResult;
use till_core::TaxClass;

/// Repository for tax class lookups.
#[derive(Debug, Clone)]
pub struct TaxClassRepository {
    pool: SqlitePool,
}

impl TaxClassRepository {
    /// Creates a new TaxClassRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TaxClassRepository { pool }
    }

    /// Gets a tax class by its code. Exact match, case-sensitive.
    ///
    /// ## Returns
    /// * `Ok(Some(TaxClass))` - Class found
    /// * `Ok(None)` - No class with that code
    pub async fn find(&self, code: &str) -> DbResult<Option<TaxClass>> {
        let tax_class = sqlx::query_as::<_, TaxClass>(
            r#"
            SELECT code, rate_bps
            FROM tax_classes
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tax_class)
    }

    /// Inserts or replaces a tax class (seed/test tooling).
    pub async fn upsert(&self, code: &str, rate_bps: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tax_classes (code, rate_bps)
            VALUES (?1, ?2)
            ON CONFLICT (code) DO UPDATE SET rate_bps = excluded.rate_bps
            "#,
        )
        .bind(code)
        .bind(rate_bps)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
