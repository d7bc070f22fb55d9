//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert with supplier reference check
//! - Listing joined with supplier names
//! - Lookup by id
//!
//! Stock levels are never written here after insert; every later change goes
//! through the [`StockLedger`](crate::StockLedger) so it is logged.
//!
//! ## Supplier Reference Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert(NewProduct { supplier_id: Some(7), .. })                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_new_product()  ── name / quantity / price rules               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT 1 FROM suppliers WHERE id = 7                                   │
//! │       │                                                                 │
//! │       ├── missing → ValidationError::UnknownReference (nothing written) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO products ...                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::supplier::supplier_exists;
use stockroom_core::validation::validate_new_product;
use stockroom_core::{NewProduct, Product, ProductListing, ValidationError};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its generated id
    /// * `Err(DbError::Validation)` - Bad field, or `supplier_id` doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let product = validate_new_product(product)?;

        debug!(name = %product.name, supplier_id = ?product.supplier_id, "Inserting product");

        let mut tx = self.pool.begin().await?;

        if let Some(supplier_id) = product.supplier_id {
            if !supplier_exists(&mut *tx, supplier_id).await? {
                return Err(ValidationError::unknown_reference("Supplier", supplier_id).into());
            }
        }

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, quantity, price_cents, supplier_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, category, quantity, price_cents, supplier_id
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.quantity)
        .bind(product.price.cents())
        .bind(product.supplier_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(inserted)
    }

    /// Lists all products with their supplier's name, oldest first.
    pub async fn list(&self) -> DbResult<Vec<ProductListing>> {
        let products = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT
                p.id,
                p.name,
                p.category,
                p.quantity,
                p.price_cents,
                p.supplier_id,
                s.name AS supplier_name
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, quantity, price_cents, supplier_id
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
