//! Storage layer for Cashbook
//!
//! The services talk to storage only through [`LedgerStore`]. Two
//! implementations ship with the crate: [`Storage`], which keeps JSON files
//! under the data directory, and [`MemoryStore`], which keeps everything in
//! memory.

pub mod categories;
pub mod file_io;
pub mod memory;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryStore;
pub use transactions::TransactionRepository;

use std::sync::{Mutex, MutexGuard};

use crate::config::paths::CashbookPaths;
use crate::error::{CashbookError, CashbookResult};
use crate::models::{Category, Transaction};

/// Storage contract consumed by the services
///
/// Entities are constructed in memory by the models (`Transaction::new`,
/// `Category::new`) and handed to the store to be persisted.
pub trait LedgerStore {
    /// Every persisted transaction, in insertion order
    fn find_all_transactions(&self) -> CashbookResult<Vec<Transaction>>;

    /// Persist one or more new transactions; all or none are stored
    fn save_transactions(&self, transactions: &[Transaction]) -> CashbookResult<()>;

    /// Exact-title category lookup
    fn find_category_by_title(&self, title: &str) -> CashbookResult<Option<Category>>;

    /// Every persisted category, ordered by title
    fn find_all_categories(&self) -> CashbookResult<Vec<Category>>;

    /// Persist a new category
    fn save_category(&self, category: &Category) -> CashbookResult<()>;

    /// Serializes read-balance/decide/write sequences within this process
    fn exclusive(&self) -> CashbookResult<MutexGuard<'_, ()>>;
}

pub(crate) fn lock_exclusive(lock: &Mutex<()>) -> CashbookResult<MutexGuard<'_, ()>> {
    lock.lock()
        .map_err(|e| CashbookError::Storage(format!("Failed to acquire ledger lock: {}", e)))
}

/// JSON-file storage coordinator
pub struct Storage {
    paths: CashbookPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    ledger_lock: Mutex<()>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CashbookPaths) -> Result<Self, CashbookError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
            ledger_lock: Mutex::new(()),
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CashbookPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), CashbookError> {
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), CashbookError> {
        self.transactions.save()?;
        self.categories.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

impl LedgerStore for Storage {
    fn find_all_transactions(&self) -> CashbookResult<Vec<Transaction>> {
        self.transactions.get_all()
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> CashbookResult<()> {
        self.transactions.append_all(transactions)
    }

    fn find_category_by_title(&self, title: &str) -> CashbookResult<Option<Category>> {
        self.categories.get_by_title(title)
    }

    fn find_all_categories(&self) -> CashbookResult<Vec<Category>> {
        self.categories.get_all()
    }

    fn save_category(&self, category: &Category) -> CashbookResult<()> {
        self.categories.upsert(category.clone())?;
        if let Err(e) = self.categories.save() {
            self.categories.forget(category.id)?;
            return Err(e);
        }
        Ok(())
    }

    fn exclusive(&self) -> CashbookResult<MutexGuard<'_, ()>> {
        lock_exclusive(&self.ledger_lock)
    }
}
