//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Ordered listing for the catalog endpoint
//! - Exact-match lookup by business code (case-sensitive, no
//!   normalization)
//! - Inserts and stock adjustments for seeding and tests
//!
//! Lookup misses are `Ok(None)`, a normal outcome distinct from storage
//! errors. The purchase recorder resolves products with the `_in`
//! variant so the read happens on the same connection as the eventual
//! stock decrement.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::Product;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // List the catalog
/// let products = repo.list().await?;
///
/// // Exact lookup by business code
/// let product = repo.find_by_code("4901234567890").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products, ordered by surrogate id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, code, name, unit_price_cents, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its business code.
    ///
    /// Exact match: case-sensitive, no trimming or normalization.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - No product with that code
    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        find_by_code_in(&mut conn, code).await
    }

    /// Inserts a product and returns it with its assigned id.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the code already exists.
    pub async fn insert(
        &self,
        code: &str,
        name: &str,
        unit_price_cents: i64,
        stock: i64,
    ) -> DbResult<Product> {
        debug!(code = %code, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (code, name, unit_price_cents, stock)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(unit_price_cents)
        .bind(stock)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            code: code.to_string(),
            name: name.to_string(),
            unit_price_cents,
            stock,
        })
    }

    /// Sets a product's stock level directly (seed/admin tooling).
    pub async fn set_stock(&self, id: i64, stock: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE products SET stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(stock)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id.to_string()));
        }

        Ok(())
    }
}

/// Gets a product by business code on an existing connection.
///
/// Used inside atomic units so the lookup shares the connection (and SQL
/// transaction) with the writes that follow it.
pub(crate) async fn find_by_code_in(
    conn: &mut SqliteConnection,
    code: &str,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, code, name, unit_price_cents, stock
        FROM products
        WHERE code = ?1
        "#,
    )
    .bind(code)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(product)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_code() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo
            .insert("4901234567890", "Green Tea 500ml", 150, 10)
            .await
            .unwrap();
        assert!(inserted.id > 0);

        let found = repo.find_by_code("4901234567890").await.unwrap().unwrap();
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.name, "Green Tea 500ml");
        assert_eq!(found.unit_price_cents, 150);
        assert_eq!(found.stock, 10);
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let db = test_db().await;

        let found = db.products().find_by_code("0000000000000").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert("abc", "Lowercase", 100, 1).await.unwrap();

        assert!(repo.find_by_code("abc").await.unwrap().is_some());
        assert!(repo.find_by_code("ABC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert("B", "Second", 200, 1).await.unwrap();
        repo.insert("A", "First", 100, 1).await.unwrap();

        let listed = repo.list().await.unwrap();
        let codes: Vec<_> = listed.iter().map(|p| p.code.as_str()).collect();
        // Insertion order, not code order
        assert_eq!(codes, ["B", "A"]);
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert("DUP", "One", 100, 1).await.unwrap();
        let err = repo.insert("DUP", "Two", 200, 2).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_set_stock() {
        let db = test_db().await;
        let repo = db.products();

        let product = repo.insert("S", "Stocked", 100, 1).await.unwrap();
        repo.set_stock(product.id, 42).await.unwrap();

        let found = repo.find_by_code("S").await.unwrap().unwrap();
        assert_eq!(found.stock, 42);

        let err = repo.set_stock(9999, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
