//! # Console Rendering
//!
//! Plain-text listings for the menu and the one-shot report commands, plus
//! their JSON form. Every text renderer returns whole lines ending in `\n`.

use std::fmt::Write as _;

use serde::Serialize;
use stockroom_core::{Product, ProductListing, StockAdjustment, Supplier, TransactionEntry, TransactionType};

const MISSING: &str = "-";

/// Timestamps are shown in UTC, to the second.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub fn suppliers(suppliers: &[Supplier]) -> String {
    if suppliers.is_empty() {
        return "No suppliers found.\n".to_string();
    }

    let mut out = String::from("Suppliers:\n");
    for s in suppliers {
        let _ = writeln!(
            out,
            "ID: {} | Name: {} | Contact: {}",
            s.id,
            s.name,
            s.contact.as_deref().unwrap_or(MISSING)
        );
    }
    out
}

pub fn products(listing: &[ProductListing]) -> String {
    if listing.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::from("Products:\n");
    for l in listing {
        let p = &l.product;
        let supplier = match (p.supplier_id, l.supplier_name.as_deref()) {
            (Some(id), Some(name)) => format!("{name} (ID: {id})"),
            (Some(id), None) => format!("ID: {id}"),
            (None, _) => MISSING.to_string(),
        };
        let _ = writeln!(
            out,
            "ID: {} | Name: {} | Category: {} | Qty: {} | Price: {} | Supplier: {}",
            p.id,
            p.name,
            p.category.as_deref().unwrap_or(MISSING),
            p.quantity,
            p.price(),
            supplier
        );
    }
    out
}

pub fn low_stock(threshold: i64, products: &[Product]) -> String {
    if products.is_empty() {
        return format!("No products with quantity <= {threshold}.\n");
    }

    let mut out = format!("Low stock (quantity <= {threshold}):\n");
    for p in products {
        let _ = writeln!(out, "ID: {} | Name: {} | Qty: {}", p.id, p.name, p.quantity);
    }
    out
}

pub fn transactions(entries: &[TransactionEntry]) -> String {
    if entries.is_empty() {
        return "No transactions recorded.\n".to_string();
    }

    let mut out = String::from("Transactions (newest first):\n");
    for t in entries {
        let _ = writeln!(
            out,
            "TransID: {} | ProdID: {} | Product: {} | Type: {} | Qty: {} | Date: {}",
            t.id,
            t.product_id,
            t.product_name.as_deref().unwrap_or(MISSING),
            t.transaction_type,
            t.quantity,
            t.created_at.format(TIMESTAMP_FORMAT)
        );
    }
    out
}

/// One-line confirmation of an applied stock movement.
pub fn adjustment(adj: &StockAdjustment) -> String {
    let (verb, sign) = match adj.transaction.transaction_type {
        TransactionType::In => ("added to", '+'),
        TransactionType::Out => ("removed from", '-'),
    };
    format!(
        "✓ {sign}{qty} {verb} '{name}' (ID: {id}). Now {now} on hand.\n",
        qty = adj.transaction.quantity,
        name = adj.product.name,
        id = adj.product.id,
        now = adj.product.quantity
    )
}

/// Pretty JSON followed by a newline.
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
