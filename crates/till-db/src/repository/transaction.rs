//! # Transaction Repository
//!
//! The purchase recorder and the transaction reader.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     record_purchase (one atomic unit)                   │
//! │                                                                         │
//! │  1. RESOLVE, in input order                                             │
//! │     └── product by code ── missing? → ProductNotFound, abort            │
//! │     └── stock check     ── short?   → InsufficientStock, abort          │
//! │                                                                         │
//! │  2. COMPUTE (till-core)                                                 │
//! │     └── pre-tax sum, truncated tax, grand total                         │
//! │                                                                         │
//! │  3. WRITE                                                               │
//! │     └── transactions header (id assigned by storage)                    │
//! │     └── transaction_lines 1..N, product snapshot + fixed tax code       │
//! │     └── guarded stock decrement (stock = stock - ? WHERE stock >= ?)    │
//! │                                                                         │
//! │  4. COMMIT - or roll everything back on any failure                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded decrement is what makes concurrent purchases safe: even if
//! another unit slipped between resolve and write, the `stock >= ?`
//! predicate refuses to take stock below zero and the whole unit rolls
//! back with `InsufficientStock`.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{CheckoutError, CheckoutResult, DbResult};
use crate::pool::Database;
use crate::repository::product::find_by_code_in;
use till_core::checkout::{check_stock, compute_totals, resolve_clerk_code};
use till_core::receipt::{tally, TransactionTotals};
use till_core::validation::validate_purchase_items;
use till_core::{
    CoreError, Money, PurchaseItem, RecordedPurchase, SaleConfig, TaxRate, Transaction,
    TransactionLine,
};

/// Repository for recording and reading purchase transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: Database,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(db: Database) -> Self {
        TransactionRepository { db }
    }

    /// Records a purchase as one atomic unit.
    ///
    /// Validates input quantities before touching storage, resolves the
    /// clerk code (blank → configured default), then runs resolve /
    /// compute / write inside a single SQL transaction. Any failure
    /// after validation discards all pending writes and surfaces the
    /// triggering error unchanged.
    ///
    /// ## Errors
    /// - `CoreError::Validation` - a quantity is not positive
    /// - `CoreError::ProductNotFound` - an item names an unknown code
    /// - `CoreError::InsufficientStock` - an item exceeds available stock
    /// - `DbError` - any storage failure
    pub async fn record_purchase(
        &self,
        config: &SaleConfig,
        requester: Option<&str>,
        items: &[PurchaseItem],
    ) -> CheckoutResult<RecordedPurchase> {
        // Input errors are rejected before any storage access
        validate_purchase_items(items).map_err(CoreError::from)?;

        let clerk_code = resolve_clerk_code(requester, &config.default_clerk_code);
        let created_at = Utc::now();

        debug!(
            clerk = %clerk_code,
            item_count = items.len(),
            "Recording purchase"
        );

        // Owned copies for the atomic closure
        let items = items.to_vec();
        let tax_rate = config.tax_rate;
        let store_code = config.store_code.clone();
        let terminal_code = config.terminal_code.clone();
        let line_tax_code = config.line_tax_code.clone();

        let recorded = self
            .db
            .atomic(move |conn| {
                Box::pin(async move {
                    // 1. Resolve products and check stock, in input order
                    let mut products = Vec::with_capacity(items.len());
                    let mut subtotals: Vec<Money> = Vec::with_capacity(items.len());

                    for item in &items {
                        let product = find_by_code_in(conn, &item.product_code)
                            .await?
                            .ok_or_else(|| {
                                CoreError::ProductNotFound(item.product_code.clone())
                            })?;

                        check_stock(&product, item.quantity)?;

                        subtotals.push(product.unit_price().multiply_quantity(item.quantity));
                        products.push(product);
                    }

                    // 2. Totals: truncated tax on the pre-tax aggregate
                    let totals = compute_totals(&subtotals, tax_rate);

                    // 3a. Header row; storage assigns the id
                    let result = sqlx::query(
                        r#"
                        INSERT INTO transactions
                            (created_at, clerk_code, store_code, terminal_code,
                             total_cents, total_excl_tax_cents)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                        "#,
                    )
                    .bind(created_at)
                    .bind(&clerk_code)
                    .bind(&store_code)
                    .bind(&terminal_code)
                    .bind(totals.incl_tax.cents())
                    .bind(totals.excl_tax.cents())
                    .execute(&mut *conn)
                    .await?;

                    let transaction_id = result.last_insert_rowid();

                    // 3b. Line items numbered 1..N in input order, each a
                    // point-in-time product snapshot with the fixed tax code
                    let mut lines = Vec::with_capacity(items.len());
                    for (idx, (item, product)) in items.iter().zip(&products).enumerate() {
                        let line = TransactionLine {
                            transaction_id,
                            line_no: idx as i64 + 1,
                            product_id: product.id,
                            product_code: product.code.clone(),
                            product_name: product.name.clone(),
                            unit_price_cents: product.unit_price_cents,
                            quantity: item.quantity,
                            tax_code: line_tax_code.clone(),
                        };

                        sqlx::query(
                            r#"
                            INSERT INTO transaction_lines
                                (transaction_id, line_no, product_id, product_code,
                                 product_name, unit_price_cents, quantity, tax_code)
                            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                            "#,
                        )
                        .bind(line.transaction_id)
                        .bind(line.line_no)
                        .bind(line.product_id)
                        .bind(&line.product_code)
                        .bind(&line.product_name)
                        .bind(line.unit_price_cents)
                        .bind(line.quantity)
                        .bind(&line.tax_code)
                        .execute(&mut *conn)
                        .await?;

                        lines.push(line);
                    }

                    // 3c. Guarded stock decrement. The predicate re-checks
                    // availability so a concurrent unit can never drive
                    // stock negative.
                    for (item, product) in items.iter().zip(&products) {
                        let result = sqlx::query(
                            r#"
                            UPDATE products
                            SET stock = stock - ?1
                            WHERE id = ?2 AND stock >= ?1
                            "#,
                        )
                        .bind(item.quantity)
                        .bind(product.id)
                        .execute(&mut *conn)
                        .await?;

                        if result.rows_affected() == 0 {
                            let available = find_by_code_in(conn, &product.code)
                                .await?
                                .map(|p| p.stock)
                                .unwrap_or(0);
                            return Err(CheckoutError::Domain(CoreError::InsufficientStock {
                                code: product.code.clone(),
                                available,
                                requested: item.quantity,
                            }));
                        }
                    }

                    Ok(RecordedPurchase {
                        transaction: Transaction {
                            id: transaction_id,
                            created_at,
                            clerk_code,
                            store_code,
                            terminal_code,
                            total_cents: totals.incl_tax.cents(),
                            total_excl_tax_cents: totals.excl_tax.cents(),
                        },
                        lines,
                    })
                })
            })
            .await?;

        info!(
            transaction_id = recorded.transaction.id,
            total = recorded.transaction.total_cents,
            lines = recorded.lines.len(),
            "Purchase recorded"
        );

        Ok(recorded)
    }

    /// Gets a transaction header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, created_at, clerk_code, store_code, terminal_code,
                   total_cents, total_excl_tax_cents
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(transaction)
    }

    /// Gets all line items for a transaction, in line order.
    pub async fn get_lines(&self, transaction_id: i64) -> DbResult<Vec<TransactionLine>> {
        let lines = sqlx::query_as::<_, TransactionLine>(
            r#"
            SELECT transaction_id, line_no, product_id, product_code,
                   product_name, unit_price_cents, quantity, tax_code
            FROM transaction_lines
            WHERE transaction_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(transaction_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(lines)
    }

    /// Reads a transaction with its per-line and aggregate tax breakdown.
    ///
    /// Lines are joined to their tax classes by stored tax code and the
    /// display math is delegated to `till_core::receipt::tally`.
    /// Read-only; safe to retry freely.
    ///
    /// ## Errors
    /// - `CoreError::TransactionNotFound` - no header with that id
    /// - `CoreError::EmptyTransaction` - the join yields zero rows
    /// - `DbError` - any storage failure
    pub async fn get_with_totals(&self, id: i64) -> CheckoutResult<TransactionTotals> {
        self.get_by_id(id)
            .await?
            .ok_or(CoreError::TransactionNotFound(id))?;

        let rows = sqlx::query_as::<_, JoinedLineRow>(
            r#"
            SELECT l.transaction_id, l.line_no, l.product_id, l.product_code,
                   l.product_name, l.unit_price_cents, l.quantity, l.tax_code,
                   t.rate_bps
            FROM transaction_lines l
            INNER JOIN tax_classes t ON l.tax_code = t.code
            WHERE l.transaction_id = ?1
            ORDER BY l.line_no
            "#,
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;

        if rows.is_empty() {
            return Err(CoreError::EmptyTransaction(id).into());
        }

        let joined: Vec<(TransactionLine, TaxRate)> =
            rows.into_iter().map(JoinedLineRow::into_parts).collect();

        Ok(tally(id, &joined))
    }
}

/// A line item row joined to its tax class rate.
#[derive(Debug, sqlx::FromRow)]
struct JoinedLineRow {
    transaction_id: i64,
    line_no: i64,
    product_id: i64,
    product_code: String,
    product_name: String,
    unit_price_cents: i64,
    quantity: i64,
    tax_code: String,
    rate_bps: i64,
}

impl JoinedLineRow {
    fn into_parts(self) -> (TransactionLine, TaxRate) {
        let rate = TaxRate::from_bps(self.rate_bps as u32);
        (
            TransactionLine {
                transaction_id: self.transaction_id,
                line_no: self.line_no,
                product_id: self.product_id,
                product_code: self.product_code,
                product_name: self.product_name,
                unit_price_cents: self.unit_price_cents,
                quantity: self.quantity,
                tax_code: self.tax_code,
            },
            rate,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let products = db.products();
        products
            .insert("4901234567890", "Green Tea 500ml", 150, 10)
            .await
            .unwrap();
        products
            .insert("4901234567891", "Rice Ball Salmon", 120, 5)
            .await
            .unwrap();
        products
            .insert("4901234567892", "Chocolate Bar", 99, 3)
            .await
            .unwrap();

        db
    }

    fn item(code: &str, qty: i64) -> PurchaseItem {
        PurchaseItem {
            product_code: code.to_string(),
            quantity: qty,
        }
    }

    #[tokio::test]
    async fn test_record_purchase_success() {
        let db = test_db().await;
        let config = SaleConfig::default();

        let recorded = db
            .transactions()
            .record_purchase(
                &config,
                Some("E001"),
                &[item("4901234567890", 2), item("4901234567891", 1)],
            )
            .await
            .unwrap();

        // Totals: 2×150 + 1×120 = 420; tax floor(42.0) = 42; total 462
        let txn = &recorded.transaction;
        assert!(txn.id > 0);
        assert_eq!(txn.clerk_code, "E001");
        assert_eq!(txn.store_code, "00001");
        assert_eq!(txn.terminal_code, "001");
        assert_eq!(txn.total_excl_tax_cents, 420);
        assert_eq!(txn.total_cents, 462);

        // Lines numbered 1..N in input order, snapshotting the products
        assert_eq!(recorded.lines.len(), 2);
        assert_eq!(recorded.lines[0].line_no, 1);
        assert_eq!(recorded.lines[0].product_code, "4901234567890");
        assert_eq!(recorded.lines[0].unit_price_cents, 150);
        assert_eq!(recorded.lines[0].tax_code, "10");
        assert_eq!(recorded.lines[1].line_no, 2);
        assert_eq!(recorded.lines[1].product_code, "4901234567891");

        // Stock decremented
        let products = db.products();
        let tea = products.find_by_code("4901234567890").await.unwrap().unwrap();
        assert_eq!(tea.stock, 8);
        let rice = products.find_by_code("4901234567891").await.unwrap().unwrap();
        assert_eq!(rice.stock, 4);

        // Persisted lines match the returned ones
        let lines = db.transactions().get_lines(txn.id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[1].line_no, 2);
    }

    #[tokio::test]
    async fn test_tax_truncation_pinned() {
        let db = test_db().await;
        let config = SaleConfig::default();

        // 99 × 1 = 99; tax floor(9.9) = 9; total 108, never 109
        let recorded = db
            .transactions()
            .record_purchase(&config, None, &[item("4901234567892", 1)])
            .await
            .unwrap();

        assert_eq!(recorded.transaction.total_excl_tax_cents, 99);
        assert_eq!(recorded.transaction.total_cents, 108);
    }

    #[tokio::test]
    async fn test_blank_requester_gets_default_clerk() {
        let db = test_db().await;
        let config = SaleConfig::default();
        let repo = db.transactions();

        for requester in [None, Some(""), Some("   ")] {
            let recorded = repo
                .record_purchase(&config, requester, &[item("4901234567890", 1)])
                .await
                .unwrap();
            assert_eq!(recorded.transaction.clerk_code, "9999999999");

            // The default appears verbatim in the stored row too
            let stored = repo.get_by_id(recorded.transaction.id).await.unwrap().unwrap();
            assert_eq!(stored.clerk_code, "9999999999");
        }
    }

    #[tokio::test]
    async fn test_unknown_product_commits_nothing() {
        let db = test_db().await;
        let config = SaleConfig::default();

        let err = db
            .transactions()
            .record_purchase(
                &config,
                None,
                &[item("4901234567890", 1), item("0000000000000", 1)],
            )
            .await
            .unwrap_err();

        match err {
            CheckoutError::Domain(CoreError::ProductNotFound(code)) => {
                assert_eq!(code, "0000000000000")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // No partial state: stock untouched, no transactions recorded
        let tea = db.products().find_by_code("4901234567890").await.unwrap().unwrap();
        assert_eq!(tea.stock, 10);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_insufficient_stock_commits_nothing() {
        let db = test_db().await;
        let config = SaleConfig::default();

        // First item passes its own check; second is short
        let err = db
            .transactions()
            .record_purchase(
                &config,
                None,
                &[item("4901234567890", 2), item("4901234567892", 4)],
            )
            .await
            .unwrap_err();

        match err {
            CheckoutError::Domain(CoreError::InsufficientStock {
                code,
                available,
                requested,
            }) => {
                assert_eq!(code, "4901234567892");
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Stock unchanged for every item, including the one that passed
        let tea = db.products().find_by_code("4901234567890").await.unwrap().unwrap();
        assert_eq!(tea.stock, 10);
        let choc = db.products().find_by_code("4901234567892").await.unwrap().unwrap();
        assert_eq!(choc.stock, 3);

        let transactions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(transactions, 0);
        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transaction_lines")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(lines, 0);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected_before_storage() {
        let db = test_db().await;
        let config = SaleConfig::default();

        let err = db
            .transactions()
            .record_purchase(&config, None, &[item("4901234567890", 0)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::Validation(_))
        ));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_empty_items_records_empty_transaction() {
        let db = test_db().await;
        let config = SaleConfig::default();
        let repo = db.transactions();

        let recorded = repo.record_purchase(&config, None, &[]).await.unwrap();
        assert_eq!(recorded.transaction.total_cents, 0);
        assert_eq!(recorded.transaction.total_excl_tax_cents, 0);
        assert!(recorded.lines.is_empty());

        // Reading it back is an error, not an empty result
        let err = repo.get_with_totals(recorded.transaction.id).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Domain(CoreError::EmptyTransaction(_))
        ));
    }

    #[tokio::test]
    async fn test_get_with_totals() {
        let db = test_db().await;
        let config = SaleConfig::default();
        let repo = db.transactions();

        let recorded = repo
            .record_purchase(
                &config,
                None,
                &[item("4901234567890", 2), item("4901234567892", 1)],
            )
            .await
            .unwrap();

        let totals = repo.get_with_totals(recorded.transaction.id).await.unwrap();

        assert_eq!(totals.transaction_id, recorded.transaction.id);
        assert_eq!(totals.lines.len(), 2);

        // Line 1: 2×150 = 300 → tax 30, total 330
        assert_eq!(totals.lines[0].name, "Green Tea 500ml");
        assert_eq!(totals.lines[0].unit_price_cents, 150);
        assert_eq!(totals.lines[0].quantity, 2);
        assert_eq!(totals.lines[0].tax_rate.bps(), 1000);
        assert_eq!(totals.lines[0].tax_cents, 30);
        assert_eq!(totals.lines[0].total_cents, 330);

        // Line 2: 1×99 = 99 → tax floor(9.9) = 9, total 108
        assert_eq!(totals.lines[1].name, "Chocolate Bar");
        assert_eq!(totals.lines[1].tax_cents, 9);
        assert_eq!(totals.lines[1].total_cents, 108);

        // Aggregates are sums of the line values
        assert_eq!(totals.total_excl_tax_cents, 399);
        assert_eq!(totals.total_tax_cents, 39);
        assert_eq!(totals.total_incl_tax_cents, 438);
    }

    #[tokio::test]
    async fn test_get_with_totals_is_idempotent() {
        let db = test_db().await;
        let config = SaleConfig::default();
        let repo = db.transactions();

        let recorded = repo
            .record_purchase(&config, None, &[item("4901234567890", 3)])
            .await
            .unwrap();

        let first = repo.get_with_totals(recorded.transaction.id).await.unwrap();
        let second = repo.get_with_totals(recorded.transaction.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_with_totals_unknown_transaction() {
        let db = test_db().await;

        let err = db.transactions().get_with_totals(9999).await.unwrap_err();
        match err {
            CheckoutError::Domain(CoreError::TransactionNotFound(id)) => assert_eq!(id, 9999),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_purchases_never_oversell() {
        let db = test_db().await;
        let config = SaleConfig::default();

        // Chocolate Bar has 3 in stock; two concurrent purchases of 2
        // would oversell by 1, so at most one may succeed.
        let repo_a = db.transactions();
        let repo_b = db.transactions();
        let (cfg_a, cfg_b) = (config.clone(), config.clone());

        let items_a = [item("4901234567892", 2)];
        let items_b = [item("4901234567892", 2)];
        let (a, b) = tokio::join!(
            repo_a.record_purchase(&cfg_a, None, &items_a),
            repo_b.record_purchase(&cfg_b, None, &items_b),
        );

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert!(successes <= 1, "both purchases of the last units succeeded");

        let choc = db.products().find_by_code("4901234567892").await.unwrap().unwrap();
        assert!(choc.stock >= 0, "stock went negative: {}", choc.stock);
        assert_eq!(choc.stock, 3 - 2 * successes as i64);
    }
}
