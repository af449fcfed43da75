//! Service layer for Cashbook
//!
//! The services apply the ledger rules on top of a [`LedgerStore`]:
//! category resolution, single transaction creation, bulk import and
//! balance queries.
//!
//! [`LedgerStore`]: crate::storage::LedgerStore

pub mod balance;
pub mod category;
pub mod import;
pub mod rules;
pub mod transaction;

pub use balance::BalanceService;
pub use category::{CategoryService, CategorySummary};
pub use import::{ImportRow, ImportService, ImportStage, ImportSummary};
pub use transaction::{
    CreateTransactionInput, TransactionListing, TransactionService, TransactionWithCategory,
};
