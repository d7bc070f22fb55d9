//! # Interactive Menu
//!
//! The numbered main menu. Each choice runs one operation against the
//! database, prints its result or its error, and comes back to the menu.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu Loop                                       │
//! │                                                                         │
//! │   ┌──────────────┐                                                      │
//! │   │ print menu   │◄──────────────────────────────────────────┐         │
//! │   └──────┬───────┘                                           │         │
//! │          ▼                                                   │         │
//! │   "Enter choice: "                                           │         │
//! │          │                                                   │         │
//! │          ├── 1..8 ─► action ─► result / "⚠ message" ─────────┤         │
//! │          ├── other ─► "Invalid choice" ──────────────────────┘         │
//! │          ├── 9 ─────► "Goodbye!" ─► return                              │
//! │          └── EOF ───► "Goodbye!" ─► return                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors from one action never end the session. Only end of input, choice
//! 9, or a failing terminal does.

use std::io::{BufRead, Write};

use stockroom_core::validation::{validate_initial_quantity, validate_name};
use stockroom_core::{NewProduct, NewSupplier, ValidationError};
use stockroom_db::{Database, DbError};

use crate::error::CliError;
use crate::prompt::{PromptError, PromptResult, Prompter};
use crate::render;

const BANNER: &str = "===== Inventory Management System =====";

const MENU: &str = "\
1. Add Supplier
2. View Suppliers
3. Add Product
4. View Products
5. Stock IN
6. Stock OUT
7. Low Stock Report
8. Transaction Report
9. Exit";

// =============================================================================
// Menu Choice
// =============================================================================

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddSupplier,
    ViewSuppliers,
    AddProduct,
    ViewProducts,
    StockIn,
    StockOut,
    LowStockReport,
    TransactionReport,
    Exit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddSupplier),
            "2" => Some(MenuChoice::ViewSuppliers),
            "3" => Some(MenuChoice::AddProduct),
            "4" => Some(MenuChoice::ViewProducts),
            "5" => Some(MenuChoice::StockIn),
            "6" => Some(MenuChoice::StockOut),
            "7" => Some(MenuChoice::LowStockReport),
            "8" => Some(MenuChoice::TransactionReport),
            "9" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Why a single menu action stopped.
#[derive(Debug, thiserror::Error)]
enum ActionError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

type ActionResult = Result<(), ActionError>;

// =============================================================================
// Menu
// =============================================================================

/// An interactive session over one database.
pub struct Menu<'a, R, W> {
    db: &'a Database,
    io: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a Database, input: R, output: W) -> Self {
        Menu {
            db,
            io: Prompter::new(input, output),
        }
    }

    /// Returns the writer, consuming the menu.
    pub fn into_output(self) -> W {
        self.io.into_output()
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// ## Errors
    /// Only I/O failures on the terminal itself.
    pub async fn run(&mut self) -> PromptResult<()> {
        self.io.say(BANNER)?;

        loop {
            self.io.say("")?;
            self.io.say(MENU)?;

            let input = match self.io.line("Enter choice: ") {
                Ok(input) => input,
                Err(PromptError::Closed) => return self.goodbye(),
                Err(e) => return Err(e),
            };

            let choice = match MenuChoice::parse(&input) {
                Some(MenuChoice::Exit) => return self.goodbye(),
                Some(choice) => choice,
                None => {
                    self.io
                        .say("⚠ Invalid choice. Please enter a number from 1 to 9.")?;
                    continue;
                }
            };

            tracing::debug!(?choice, "Menu choice");

            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(ActionError::Db(err)) => {
                    let err = CliError::from(err);
                    self.io.say(format!("⚠ {err}"))?;
                }
                Err(ActionError::Prompt(PromptError::Closed)) => return self.goodbye(),
                Err(ActionError::Prompt(e)) => return Err(e),
            }
        }
    }

    fn goodbye(&mut self) -> PromptResult<()> {
        self.io.say("Goodbye!")
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> ActionResult {
        match choice {
            MenuChoice::AddSupplier => self.add_supplier().await,
            MenuChoice::ViewSuppliers => self.view_suppliers().await,
            MenuChoice::AddProduct => self.add_product().await,
            MenuChoice::ViewProducts => self.view_products().await,
            MenuChoice::StockIn => self.stock_in().await,
            MenuChoice::StockOut => self.stock_out().await,
            MenuChoice::LowStockReport => self.low_stock_report().await,
            MenuChoice::TransactionReport => self.transaction_report().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    async fn add_supplier(&mut self) -> ActionResult {
        let name = self.io.line("Supplier name: ")?;
        validate_name("name", &name).map_err(DbError::from)?;
        let contact = self.io.optional_line("Contact info (optional): ")?;

        let mut supplier = NewSupplier::new(name);
        supplier.contact = contact;

        let supplier = self.db.suppliers().insert(&supplier).await?;
        self.io.say(format!(
            "✓ Supplier '{}' added with ID {}.",
            supplier.name, supplier.id
        ))?;
        Ok(())
    }

    async fn view_suppliers(&mut self) -> ActionResult {
        let suppliers = self.db.suppliers().list().await?;
        self.io.say(render::suppliers(&suppliers).trim_end())?;
        Ok(())
    }

    async fn add_product(&mut self) -> ActionResult {
        let name = self.io.line("Product name: ")?;
        validate_name("name", &name).map_err(DbError::from)?;
        let category = self.io.optional_line("Category (optional): ")?;

        let quantity = self.io.integer("Initial quantity: ")?;
        validate_initial_quantity(quantity).map_err(DbError::from)?;

        let price = self.io.money("Price per unit: ")?;

        self.view_suppliers().await?;
        let supplier_id = self
            .io
            .optional_integer("Supplier ID (press Enter to skip): ")?;

        if let Some(id) = supplier_id {
            if !self.db.suppliers().exists(id).await? {
                let err = ValidationError::unknown_reference("Supplier", id);
                return Err(DbError::from(err).into());
            }
        }

        let mut product = NewProduct::new(name, quantity, price);
        product.category = category;
        product.supplier_id = supplier_id;

        let product = self.db.products().insert(&product).await?;
        self.io.say(format!(
            "✓ Product '{}' added with ID {}.",
            product.name, product.id
        ))?;
        Ok(())
    }

    async fn view_products(&mut self) -> ActionResult {
        let listing = self.db.products().list().await?;
        self.io.say(render::products(&listing).trim_end())?;
        Ok(())
    }

    async fn stock_in(&mut self) -> ActionResult {
        let product_id = self.pick_product().await?;
        let qty = self.io.integer("Quantity to add: ")?;

        let adj = self.db.ledger().stock_in(product_id, qty).await?;
        self.io.say(render::adjustment(&adj).trim_end())?;
        Ok(())
    }

    async fn stock_out(&mut self) -> ActionResult {
        let product_id = self.pick_product().await?;
        let qty = self.io.integer("Quantity to remove: ")?;

        let adj = self.db.ledger().stock_out(product_id, qty).await?;
        self.io.say(render::adjustment(&adj).trim_end())?;
        Ok(())
    }

    /// Shows the product list and asks for an id that exists.
    async fn pick_product(&mut self) -> Result<i64, ActionError> {
        self.view_products().await?;
        let product_id = self.io.integer("Product ID: ")?;

        match self.db.products().get_by_id(product_id).await? {
            Some(product) => Ok(product.id),
            None => Err(DbError::not_found("Product", product_id).into()),
        }
    }

    async fn low_stock_report(&mut self) -> ActionResult {
        let threshold = self.io.integer("Show products with quantity at or below: ")?;

        let products = self.db.reports().low_stock(threshold).await?;
        self.io.say(render::low_stock(threshold, &products).trim_end())?;
        Ok(())
    }

    async fn transaction_report(&mut self) -> ActionResult {
        let entries = self.db.reports().transactions().await?;
        self.io.say(render::transactions(&entries).trim_end())?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use stockroom_core::Money;

    /// Runs a whole session with `script` as stdin and returns stdout.
    async fn session(db: &Database, script: &str) -> String {
        let mut menu = Menu::new(db, Cursor::new(script.to_string()), Vec::new());
        menu.run().await.unwrap();
        String::from_utf8(menu.into_output()).unwrap()
    }

    async fn widget(db: &Database, quantity: i64) -> i64 {
        db.products()
            .insert(&NewProduct::new("Widget", quantity, Money::from_cents(250)))
            .await
            .unwrap()
            .id
    }

    #[test]
    fn parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddSupplier));
        assert_eq!(MenuChoice::parse(" 9 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[tokio::test]
    async fn exit_and_end_of_input() {
        let db = Database::in_memory().await.unwrap();

        let out = session(&db, "9\n").await;
        assert!(out.starts_with(BANNER));
        assert!(out.ends_with("Goodbye!\n"));

        let out = session(&db, "").await;
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn invalid_choice_returns_to_menu() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "42\nabc\n9\n").await;
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert_eq!(out.matches("Enter choice: ").count(), 3);
    }

    #[tokio::test]
    async fn add_and_view_supplier() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "1\nAcme\nacme@example.com\n2\n9\n").await;

        assert!(out.contains("✓ Supplier 'Acme' added with ID 1."));
        assert!(out.contains("ID: 1 | Name: Acme | Contact: acme@example.com"));
        assert_eq!(db.suppliers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_supplier_name_is_reported() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "1\n\n9\n").await;

        assert!(out.contains("⚠ name is required"));
        assert_eq!(db.suppliers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn add_product_with_retries_and_supplier() {
        let db = Database::in_memory().await.unwrap();
        db.suppliers().insert(&NewSupplier::new("Acme")).await.unwrap();

        // quantity "ten" and price "x" are retried in place
        let out = session(&db, "3\nWidget\nParts\nten\n10\nx\n12.50\n1\n4\n9\n").await;

        assert!(out.contains("Please enter a valid integer"));
        assert!(out.contains("✓ Product 'Widget' added with ID 1."));
        assert!(out.contains(
            "ID: 1 | Name: Widget | Category: Parts | Qty: 10 | Price: 12.50 | Supplier: Acme (ID: 1)"
        ));
    }

    #[tokio::test]
    async fn add_product_with_unknown_supplier_is_rejected() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "3\nWidget\n\n5\n1.00\n99\n9\n").await;

        assert!(out.contains("⚠ Supplier 99 does not exist"));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn price_with_extra_decimals_is_rounded() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "3\nWasher\n\n100\n0.125\n\n4\n9\n").await;

        assert!(!out.contains("expected a number"));
        assert!(out.contains("ID: 1 | Name: Washer | Category: - | Qty: 100 | Price: 0.13"));
    }

    #[tokio::test]
    async fn negative_initial_quantity_stops_before_price() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "3\nWidget\n\n-1\n9\n").await;

        assert!(out.contains("⚠ quantity must be 0 or greater"));
        assert!(!out.contains("Price per unit: "));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn stock_in_and_out() {
        let db = Database::in_memory().await.unwrap();
        let id = widget(&db, 10).await;

        let script = format!("5\n{id}\n5\n6\n{id}\n20\n6\n{id}\n4\n9\n");
        let out = session(&db, &script).await;

        assert!(out.contains("✓ +5 added to 'Widget' (ID: 1). Now 15 on hand."));
        assert!(out.contains("⚠ Not enough stock for product 1: available 15, requested 20"));
        assert!(out.contains("✓ -4 removed from 'Widget' (ID: 1). Now 11 on hand."));

        let product = db.products().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 11);
        assert_eq!(db.reports().transactions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stock_in_unknown_product_skips_quantity() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "5\n7\n9\n").await;

        assert!(out.contains("⚠ Product not found: 7"));
        assert!(!out.contains("Quantity to add: "));
    }

    #[tokio::test]
    async fn stock_in_rejects_non_positive_quantity() {
        let db = Database::in_memory().await.unwrap();
        let id = widget(&db, 10).await;

        let out = session(&db, &format!("5\n{id}\n0\n9\n")).await;
        assert!(out.contains("⚠ quantity must be a positive integer"));
        assert!(db.reports().transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports() {
        let db = Database::in_memory().await.unwrap();
        let id = widget(&db, 3).await;
        db.ledger().stock_in(id, 2).await.unwrap();

        let out = session(&db, "7\n5\n7\n4\n8\n9\n").await;

        assert!(out.contains("Low stock (quantity <= 5):\nID: 1 | Name: Widget | Qty: 5"));
        assert!(out.contains("No products with quantity <= 4."));
        assert!(out.contains("Product: Widget | Type: IN | Qty: 2"));
    }

    #[tokio::test]
    async fn storage_failure_is_reported_and_menu_continues() {
        let db = Database::in_memory().await.unwrap();
        let id = widget(&db, 10).await;

        sqlx::query(
            "CREATE TRIGGER fail_insert BEFORE INSERT ON stock_transactions \
             BEGIN SELECT RAISE(ABORT, 'disk on fire'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let out = session(&db, &format!("5\n{id}\n5\n4\n9\n")).await;

        assert!(out.contains("⚠ Database operation failed: Query failed: disk on fire"));
        // back at the menu, and the product list still shows the old level
        assert_eq!(out.matches("Enter choice: ").count(), 3);
        assert!(out.contains("Qty: 10"));
        assert!(!out.contains("Now 15 on hand"));
        assert!(out.ends_with("Goodbye!\n"));

        let product = db.products().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
    }

    #[tokio::test]
    async fn end_of_input_mid_action_exits_cleanly() {
        let db = Database::in_memory().await.unwrap();
        let out = session(&db, "3\nWidget\n").await;

        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
