//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Supplier     │   │    Product      │   │  StockTransaction    │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id             │◄──│  supplier_id?   │◄──│  product_id          │  │
//! │  │  name           │   │  name           │   │  transaction_type    │  │
//! │  │  contact?       │   │  category?      │   │  quantity (> 0)      │  │
//! │  └─────────────────┘   │  quantity (≥ 0) │   │  created_at          │  │
//! │                        │  price_cents    │   └──────────────────────┘  │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Suppliers and products are created once and never edited or deleted.
//! Transactions are append-only: the audit trail of every stock mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Supplier
// =============================================================================

/// A supplier products may be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    /// Phone number, email, or anything else the user typed.
    pub contact: Option<String>,
}

/// Input for creating a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact: Option<String>,
}

impl NewSupplier {
    pub fn new(name: impl Into<String>) -> Self {
        NewSupplier {
            name: name.into(),
            contact: None,
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form grouping such as "Beverages".
    pub category: Option<String>,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Supplier this product is sourced from, if any.
    pub supplier_id: Option<i64>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks that `quantity` units can be taken out of stock.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::Product;
    ///
    /// let product = Product {
    ///     id: 1,
    ///     name: "Widget".into(),
    ///     category: None,
    ///     quantity: 10,
    ///     price_cents: 250,
    ///     supplier_id: None,
    /// };
    ///
    /// assert!(product.check_stock_out(4).is_ok());
    /// assert!(product.check_stock_out(15).is_err());
    /// ```
    pub fn check_stock_out(&self, quantity: i64) -> CoreResult<()> {
        if quantity > self.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: self.id,
                available: self.quantity,
                requested: quantity,
            });
        }
        Ok(())
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    /// Initial stock level.
    pub quantity: i64,
    pub price: Money,
    pub supplier_id: Option<i64>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, quantity: i64, price: Money) -> Self {
        NewProduct {
            name: name.into(),
            category: None,
            quantity,
            price,
            supplier_id: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_supplier(mut self, supplier_id: i64) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }
}

/// A product together with the name of its supplier, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub product: Product,
    pub supplier_name: Option<String>,
}

// =============================================================================
// Transaction Type
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Stock received.
    In,
    /// Stock removed.
    Out,
}

impl TransactionType {
    /// Signed quantity change this movement applies to a product.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::TransactionType;
    ///
    /// assert_eq!(TransactionType::In.delta(5), 5);
    /// assert_eq!(TransactionType::Out.delta(5), -5);
    /// ```
    #[inline]
    pub const fn delta(&self, quantity: i64) -> i64 {
        match self {
            TransactionType::In => quantity,
            TransactionType::Out => -quantity,
        }
    }

    /// Column value as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::In => "IN",
            TransactionType::Out => "OUT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Stock Transaction
// =============================================================================

/// An immutable record of one stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockTransaction {
    pub id: i64,
    pub product_id: i64,
    pub transaction_type: TransactionType,
    /// Always positive; the direction comes from `transaction_type`.
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// A transaction joined with its product's name, for the transaction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionEntry {
    pub id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// The outcome of an applied stock-in or stock-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// The product as it is after the change.
    pub product: Product,
    /// The transaction appended for the change.
    pub transaction: StockTransaction,
}

// =============================================================================
// Unit Tests
// =============================================================================
