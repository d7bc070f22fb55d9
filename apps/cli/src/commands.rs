//! # One-Shot Commands
//!
//! Non-interactive report commands (`low-stock`, `transactions`). Each runs
//! one query, writes the result as text or JSON, and returns.

use std::io::{self, Write};

use stockroom_db::Database;

use crate::config::Command;
use crate::error::CliError;
use crate::menu::Menu;
use crate::render;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The operation was rejected; shown to the user.
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error("writing output")]
    Io(#[from] io::Error),

    #[error("encoding JSON output")]
    Json(#[from] serde_json::Error),
}

impl From<stockroom_db::DbError> for CommandError {
    fn from(err: stockroom_db::DbError) -> Self {
        CommandError::Cli(err.into())
    }
}

/// Runs the low-stock report.
pub async fn low_stock(
    db: &Database,
    threshold: i64,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let products = db.reports().low_stock(threshold).await?;

    let text = if json {
        render::json(&products)?
    } else {
        render::low_stock(threshold, &products)
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Runs the transaction report.
pub async fn transactions(
    db: &Database,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let entries = db.reports().transactions().await?;

    let text = if json {
        render::json(&entries)?
    } else {
        render::transactions(&entries)
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Dispatches `command` against stdin/stdout.
pub async fn execute(db: &Database, command: &Command) -> Result<(), CommandError> {
    match command {
        Command::Menu => {
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            Menu::new(db, stdin, stdout)
                .run()
                .await
                .map_err(|e| CommandError::Io(e.into()))
        }
        Command::LowStock { threshold, json } => {
            low_stock(db, *threshold, *json, &mut io::stdout().lock()).await
        }
        Command::Transactions { json } => transactions(db, *json, &mut io::stdout().lock()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockroom_core::{Money, NewProduct};

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        let products = db.products();
        let low = products
            .insert(&NewProduct::new("Bolt", 2, Money::from_cents(10)))
            .await
            .unwrap();
        products
            .insert(&NewProduct::new("Crate", 40, Money::from_cents(900)))
            .await
            .unwrap();
        db.ledger().stock_in(low.id, 1).await.unwrap();
        db
    }

    #[tokio::test]
    async fn low_stock_text() {
        let db = seeded().await;
        let mut out = Vec::new();
        low_stock(&db, 5, false, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("ID: 1 | Name: Bolt | Qty: 3"));
        assert!(!out.contains("Crate"));
    }

    #[tokio::test]
    async fn low_stock_json() {
        let db = seeded().await;
        let mut out = Vec::new();
        low_stock(&db, 5, true, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["name"], "Bolt");
        assert_eq!(value[0]["quantity"], 3);
    }

    #[tokio::test]
    async fn low_stock_negative_threshold_is_a_validation_error() {
        let db = seeded().await;
        let mut out = Vec::new();
        let err = low_stock(&db, -1, false, &mut out).await.unwrap_err();

        match err {
            CommandError::Cli(e) => assert_eq!(e.code, ErrorCode::ValidationError),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn transactions_json() {
        let db = seeded().await;
        let mut out = Vec::new();
        transactions(&db, true, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["product_name"], "Bolt");
        assert_eq!(value[0]["transaction_type"], "IN");
        assert_eq!(value[0]["quantity"], 1);
    }
}
