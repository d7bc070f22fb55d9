//! # Repository Module
//!
//! Database repository implementations for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Menu action                                                           │
//! │       │                                                                 │
//! │       │  db.ledger().stock_out(product_id, 4)                          │
//! │       ▼                                                                 │
//! │  StockLedger                                                           │
//! │  ├── stock_in(&self, product_id, qty)                                  │
//! │  ├── stock_out(&self, product_id, qty)                                 │
//! │  └── adjust(&self, product_id, type, qty, at)                          │
//! │       │                                                                 │
//! │       │  SQL (one transaction)                                         │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier insert / list / existence
//! - [`ProductRepository`](product::ProductRepository) - Product insert / list / lookup
//! - [`StockLedger`](ledger::StockLedger) - Atomic stock-in / stock-out with audit trail
//! - [`ReportRepository`](report::ReportRepository) - Low-stock and transaction reports

pub mod ledger;
pub mod product;
pub mod report;
pub mod supplier;
