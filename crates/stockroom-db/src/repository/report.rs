//! # Report Queries
//!
//! The two read-only reports: products at or under a restock threshold, and
//! the full transaction log newest first.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_threshold;
use stockroom_core::{Product, TransactionEntry};

/// Repository for report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Products whose quantity is at or below `threshold`, lowest stock first.
    ///
    /// ## Errors
    /// * `DbError::Validation` - `threshold` is negative
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<Product>> {
        validate_threshold(threshold)?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, quantity, price_cents, supplier_id
            FROM products
            WHERE quantity <= ?1
            ORDER BY quantity ASC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        debug!(threshold, count = products.len(), "Low stock report");
        Ok(products)
    }

    /// Every transaction with its product name, newest first.
    ///
    /// Transactions sharing a timestamp are ordered by id, highest first.
    pub async fn transactions(&self) -> DbResult<Vec<TransactionEntry>> {
        let entries = sqlx::query_as::<_, TransactionEntry>(
            r#"
            SELECT
                t.id,
                t.product_id,
                p.name AS product_name,
                t.transaction_type,
                t.quantity,
                t.created_at
            FROM stock_transactions t
            LEFT JOIN products p ON p.id = t.product_id
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Transaction report");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::error::ErrorKind;
    use crate::Database;
    use stockroom_core::{Money, NewProduct, TransactionType};

    async fn product(db: &Database, name: &str, quantity: i64) -> i64 {
        db.products()
            .insert(&NewProduct::new(name, quantity, Money::from_cents(100)))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn low_stock_filters_and_sorts_ascending() {
        let db = Database::in_memory().await.unwrap();
        let plenty = product(&db, "Plenty", 50).await;
        let five = product(&db, "Five", 5).await;
        let zero = product(&db, "Zero", 0).await;
        let also_five = product(&db, "Also five", 5).await;

        let low = db.reports().low_stock(5).await.unwrap();
        let ids: Vec<i64> = low.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![zero, five, also_five]);
        assert!(!ids.contains(&plenty));

        let none_below_zero = db.reports().low_stock(0).await.unwrap();
        assert_eq!(none_below_zero.len(), 1);
        assert_eq!(none_below_zero[0].id, zero);
    }

    #[tokio::test]
    async fn low_stock_reflects_ledger_changes() {
        let db = Database::in_memory().await.unwrap();
        let id = product(&db, "Widget", 10).await;
        assert!(db.reports().low_stock(5).await.unwrap().is_empty());

        db.ledger().stock_out(id, 6).await.unwrap();
        let low = db.reports().low_stock(5).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].quantity, 4);
    }

    #[tokio::test]
    async fn negative_threshold_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        let err = db.reports().low_stock(-1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn transactions_newest_first_with_id_tiebreak() {
        let db = Database::in_memory().await.unwrap();
        let widget = product(&db, "Widget", 10).await;
        let gadget = product(&db, "Gadget", 10).await;
        let ledger = db.ledger();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let later = t0 + Duration::hours(1);

        let a = ledger
            .adjust(widget, TransactionType::In, 1, t0)
            .await
            .unwrap();
        let b = ledger
            .adjust(gadget, TransactionType::Out, 2, later)
            .await
            .unwrap();
        let c = ledger
            .adjust(widget, TransactionType::Out, 3, later)
            .await
            .unwrap();

        let entries = db.reports().transactions().await.unwrap();
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec![c.transaction.id, b.transaction.id, a.transaction.id]
        );

        assert_eq!(entries[0].product_name.as_deref(), Some("Widget"));
        assert_eq!(entries[0].transaction_type, TransactionType::Out);
        assert_eq!(entries[0].quantity, 3);
        assert_eq!(entries[1].product_name.as_deref(), Some("Gadget"));
        assert_eq!(entries[2].created_at, t0);
    }

    #[tokio::test]
    async fn transactions_empty() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.reports().transactions().await.unwrap().is_empty());
    }
}
