//! Display formatting for terminal output
//!
//! Turns service results into tables and summaries for the CLI.

pub mod balance;
pub mod category;
pub mod transaction;

pub use balance::format_balance;
pub use category::format_category_table;
pub use transaction::{
    format_import_summary, format_transaction_created, format_transaction_register,
};
