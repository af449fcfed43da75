//! In-memory ledger store
//!
//! Same contract as the JSON storage without touching the filesystem.
//! Useful for tests and for embedding the services in another process.

use std::sync::{Mutex, MutexGuard, RwLock};

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Category, Transaction};

use super::{lock_exclusive, LedgerStore};

#[derive(Default)]
pub struct MemoryStore {
    transactions: RwLock<Vec<Transaction>>,
    categories: RwLock<Vec<Category>>,
    ledger_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store that already holds the given records
    pub fn with_records(categories: Vec<Category>, transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            categories: RwLock::new(categories),
            ledger_lock: Mutex::new(()),
        }
    }

    pub fn transaction_count(&self) -> CashbookResult<usize> {
        Ok(self.find_all_transactions()?.len())
    }

    pub fn category_count(&self) -> CashbookResult<usize> {
        Ok(self.find_all_categories()?.len())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> CashbookError {
    CashbookError::Storage(format!("Memory store lock poisoned: {}", e))
}

impl LedgerStore for MemoryStore {
    fn find_all_transactions(&self) -> CashbookResult<Vec<Transaction>> {
        Ok(self.transactions.read().map_err(poisoned)?.clone())
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> CashbookResult<()> {
        let mut stored = self.transactions.write().map_err(poisoned)?;
        if let Some(dup) = transactions
            .iter()
            .find(|t| stored.iter().any(|s| s.id == t.id))
        {
            return Err(CashbookError::Storage(format!(
                "Transaction already stored: {}",
                dup.id
            )));
        }
        stored.extend_from_slice(transactions);
        Ok(())
    }

    fn find_category_by_title(&self, title: &str) -> CashbookResult<Option<Category>> {
        let categories = self.categories.read().map_err(poisoned)?;
        Ok(categories.iter().find(|c| c.matches_title(title)).cloned())
    }

    fn find_all_categories(&self) -> CashbookResult<Vec<Category>> {
        let mut list = self.categories.read().map_err(poisoned)?.clone();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    fn save_category(&self, category: &Category) -> CashbookResult<()> {
        let mut categories = self.categories.write().map_err(poisoned)?;
        if categories
            .iter()
            .any(|c| c.title == category.title && c.id != category.id)
        {
            return Err(CashbookError::Storage(format!(
                "Category title already taken: {}",
                category.title
            )));
        }
        categories.retain(|c| c.id != category.id);
        categories.push(category.clone());
        Ok(())
    }

    fn exclusive(&self) -> CashbookResult<MutexGuard<'_, ()>> {
        lock_exclusive(&self.ledger_lock)
    }
}
