//! Category service
//!
//! Resolves category titles to categories, creating them on first use, and
//! summarises how much flows through each one.

use std::collections::HashMap;

use log::info;

use crate::error::CashbookResult;
use crate::models::{Balance, Category, CategoryId};
use crate::storage::LedgerStore;

/// Service for category management
pub struct CategoryService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

/// A category with the transactions filed under it
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: Category,
    pub transaction_count: usize,
    pub balance: Balance,
}

impl<'a, S: LedgerStore + ?Sized> CategoryService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Return the category with this exact title, creating it if needed
    ///
    /// Two callers resolving the same unseen title at once could both
    /// create it; the creators call this while holding
    /// [`LedgerStore::exclusive`], and other callers should do the same.
    pub fn resolve(&self, title: &str) -> CashbookResult<Category> {
        if let Some(category) = self.store.find_category_by_title(title)? {
            return Ok(category);
        }

        let category = Category::new(title);
        self.store.save_category(&category)?;
        info!(
            "event=category_created id={} title={:?}",
            category.id, category.title
        );

        Ok(category)
    }

    /// All categories, ordered by title
    pub fn list(&self) -> CashbookResult<Vec<Category>> {
        self.store.find_all_categories()
    }

    /// All categories with their transaction counts and balances
    pub fn summaries(&self) -> CashbookResult<Vec<CategorySummary>> {
        let transactions = self.store.find_all_transactions()?;

        let mut grouped: HashMap<CategoryId, Vec<_>> = HashMap::new();
        for txn in &transactions {
            grouped.entry(txn.category_id).or_default().push(txn);
        }

        Ok(self
            .list()?
            .into_iter()
            .map(|category| {
                let filed = grouped.remove(&category.id).unwrap_or_default();
                CategorySummary {
                    transaction_count: filed.len(),
                    balance: Balance::compute(filed),
                    category,
                }
            })
            .collect())
    }
}
