//! Core data models for Cashbook
//!
//! Transactions, categories, the fixed-point `Money` amount and the derived
//! `Balance`.

pub mod balance;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use balance::Balance;
pub use category::Category;
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionType, UnknownTransactionType};
