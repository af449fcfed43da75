//! Transaction service
//!
//! Creates single transactions under the ledger rules and lists the
//! transaction set together with the balance it produces.

use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::error::CashbookResult;
use crate::models::{Balance, Money, Transaction, TransactionType};
use crate::services::category::CategoryService;
use crate::services::rules::{self, DEFAULT_MINIMUM_VALUE};
use crate::storage::LedgerStore;

/// Service for transaction management
pub struct TransactionService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
    minimum_value: Money,
}

/// Input for creating a new transaction
///
/// `transaction_type` stays a string until validation so unknown types are
/// reported as ledger rejections rather than argument errors.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub title: String,
    pub value: Money,
    pub transaction_type: String,
    pub category: String,
}

/// A transaction with its category title for display
#[derive(Debug, Clone, Serialize)]
pub struct TransactionWithCategory {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category_title: Option<String>,
}

/// Every transaction plus the balance they produce
#[derive(Debug, Clone, Serialize)]
pub struct TransactionListing {
    pub transactions: Vec<TransactionWithCategory>,
    pub balance: Balance,
}

impl<'a, S: LedgerStore + ?Sized> TransactionService<'a, S> {
    /// Create a new transaction service
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            minimum_value: DEFAULT_MINIMUM_VALUE,
        }
    }

    /// Use a different minimum value
    pub fn with_minimum_value(mut self, minimum_value: Money) -> Self {
        self.minimum_value = minimum_value;
        self
    }

    /// Create a new transaction
    ///
    /// The category is resolved first, so a rejected attempt can still leave
    /// a newly created category behind.
    pub fn create(&self, input: CreateTransactionInput) -> CashbookResult<Transaction> {
        let _guard = self.store.exclusive()?;

        let category = CategoryService::new(self.store).resolve(&input.category)?;

        let transaction_type = rules::check_type(&input.transaction_type, None)?;
        rules::check_value(input.value, self.minimum_value, None)?;

        let mut balance = Balance::compute(&self.store.find_all_transactions()?);
        if transaction_type == TransactionType::Outcome {
            rules::check_funds(&balance, input.value, None)?;
        }
        balance.record(transaction_type, input.value, None)?;

        let txn = Transaction::new(
            input.title.trim(),
            input.value,
            transaction_type,
            category.id,
        );
        self.store.save_transactions(std::slice::from_ref(&txn))?;

        info!(
            "event=transaction_created id={} type={} value={} category={:?}",
            txn.id, txn.transaction_type, txn.value, category.title
        );

        Ok(txn)
    }

    /// All transactions in insertion order, with category titles and balance
    pub fn list(&self) -> CashbookResult<TransactionListing> {
        let transactions = self.store.find_all_transactions()?;
        let balance = Balance::compute(&transactions);

        let titles: HashMap<_, _> = self
            .store
            .find_all_categories()?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        let transactions = transactions
            .into_iter()
            .map(|transaction| TransactionWithCategory {
                category_title: titles.get(&transaction.category_id).cloned(),
                transaction,
            })
            .collect();

        Ok(TransactionListing {
            transactions,
            balance,
        })
    }
}
