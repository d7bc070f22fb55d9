//! # Supplier Repository
//!
//! Database operations for suppliers. Suppliers are only ever inserted and
//! read; products reference them by id.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::validation::validate_new_supplier;
use stockroom_core::{NewSupplier, Supplier};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a new supplier.
    ///
    /// ## Returns
    /// * `Ok(Supplier)` - Inserted supplier with its generated id
    /// * `Err(DbError::Validation)` - Name is blank or too long
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        let supplier = validate_new_supplier(supplier)?;

        debug!(name = %supplier.name, "Inserting supplier");

        let inserted = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact)
            VALUES (?1, ?2)
            RETURNING id, name, contact
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.contact)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Lists all suppliers, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact
            FROM suppliers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = suppliers.len(), "Listed suppliers");
        Ok(suppliers)
    }

    /// Gets a supplier by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Checks whether a supplier with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        supplier_exists(&self.pool, id).await
    }

    /// Counts suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Looks a supplier id up on any executor, so the product insert can run the
/// same check inside its transaction.
pub(crate) async fn supplier_exists<'e, E>(executor: E, id: i64) -> DbResult<bool>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM suppliers WHERE id = ?1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}
