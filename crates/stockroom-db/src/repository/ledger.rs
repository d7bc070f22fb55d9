//! # Stock Ledger
//!
//! Applies stock-in and stock-out to products and appends the matching
//! transaction record.
//!
//! ## One Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    stock_out(product_id = 1, qty = 4)                   │
//! │                                                                         │
//! │  validate_stock_quantity(4)           qty <= 0 → ValidationError        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │  SELECT ... FROM products WHERE id=1  missing  → NotFound               │
//! │       │                                                                 │
//! │  check_stock_out(4)                   qty > on hand → InsufficientStock │
//! │       │                                                                 │
//! │  UPDATE products SET quantity = quantity - 4                            │
//! │       WHERE id = 1 AND quantity >= 4                                    │
//! │       │                                                                 │
//! │  INSERT INTO stock_transactions (1, 'OUT', 4, now)                      │
//! │       │                                                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction → ROLLBACK               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use stockroom_core::validation::{checked_stock_increase, validate_stock_quantity};
use stockroom_core::{Product, StockAdjustment, StockTransaction, TransactionType};

/// Stock mutations with their audit trail.
#[derive(Debug, Clone)]
pub struct StockLedger {
    pool: SqlitePool,
}

impl StockLedger {
    /// Creates a new StockLedger.
    pub fn new(pool: SqlitePool) -> Self {
        StockLedger { pool }
    }

    /// Adds `qty` units to a product and logs an IN transaction.
    ///
    /// ## Errors
    /// * `DbError::Validation` - `qty` is not positive
    /// * `DbError::NotFound` - No product with this id
    pub async fn stock_in(&self, product_id: i64, qty: i64) -> DbResult<StockAdjustment> {
        self.adjust(product_id, TransactionType::In, qty, Utc::now())
            .await
    }

    /// Removes `qty` units from a product and logs an OUT transaction.
    ///
    /// ## Errors
    /// * `DbError::Validation` - `qty` is not positive
    /// * `DbError::NotFound` - No product with this id
    /// * `DbError::InsufficientStock` - `qty` exceeds the quantity on hand
    pub async fn stock_out(&self, product_id: i64, qty: i64) -> DbResult<StockAdjustment> {
        self.adjust(product_id, TransactionType::Out, qty, Utc::now())
            .await
    }

    /// Applies a stock movement stamped with `at`.
    ///
    /// The quantity update and the transaction insert commit together or not
    /// at all. A rejected movement leaves the database untouched.
    pub async fn adjust(
        &self,
        product_id: i64,
        transaction_type: TransactionType,
        qty: i64,
        at: DateTime<Utc>,
    ) -> DbResult<StockAdjustment> {
        validate_stock_quantity(qty)?;

        debug!(product_id, %transaction_type, qty, "Adjusting stock");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let product = fetch_product(&mut tx, product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", product_id))?;

        match transaction_type {
            TransactionType::In => {
                checked_stock_increase(product.quantity, qty)?;
            }
            TransactionType::Out => product.check_stock_out(qty)?,
        }

        let delta = transaction_type.delta(qty);
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET quantity = quantity + ?2
            WHERE id = ?1 AND quantity + ?2 >= 0
            RETURNING id, name, category, quantity, price_cents, supplier_id
            "#,
        )
        .bind(product_id)
        .bind(delta)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::InsufficientStock {
            product_id,
            available: product.quantity,
            requested: qty,
        })?;

        let transaction = sqlx::query_as::<_, StockTransaction>(
            r#"
            INSERT INTO stock_transactions (product_id, transaction_type, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_id, transaction_type, quantity, created_at
            "#,
        )
        .bind(product_id)
        .bind(transaction_type)
        .bind(qty)
        .bind(at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            product_id,
            %transaction_type,
            qty,
            quantity = updated.quantity,
            transaction_id = transaction.id,
            "Stock adjusted"
        );

        Ok(StockAdjustment {
            product: updated,
            transaction,
        })
    }
}

async fn fetch_product(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, category, quantity, price_cents, supplier_id
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(product_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(product)
}
