//! Cashbook - a small income/outcome ledger
//!
//! Records income and outcome transactions filed under categories and keeps
//! the running balance from ever going negative. Transactions are added one
//! at a time or imported in bulk from CSV; an import is all-or-nothing.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Transactions, categories, money and balances
//! - `storage`: The `LedgerStore` contract with JSON and in-memory stores
//! - `services`: Ledger rules, category resolution, creation and import
//! - `cli`: Command handlers for the `cashbook` binary
//! - `display`: Terminal tables
//!
//! # Example
//!
//! ```rust,ignore
//! use cashbook::config::{paths::CashbookPaths, settings::Settings};
//! use cashbook::services::ImportService;
//! use cashbook::storage::Storage;
//!
//! let paths = CashbookPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let imported = ImportService::new(&storage)
//!     .with_minimum_value(settings.minimum_value)
//!     .import_file("statement.csv".as_ref())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CashbookError, CashbookResult};
