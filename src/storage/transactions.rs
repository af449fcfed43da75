//! Transaction repository for JSON storage
//!
//! Transactions are append-only, so the repository keeps them in insertion
//! order with an id index for duplicate detection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::CashbookError;
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

#[derive(Default)]
struct Ledger {
    entries: Vec<Transaction>,
    ids: HashSet<TransactionId>,
}

impl Ledger {
    fn push(&mut self, txn: Transaction) {
        self.ids.insert(txn.id);
        self.entries.push(txn);
    }

    fn truncate(&mut self, len: usize) {
        for txn in self.entries.drain(len..) {
            self.ids.remove(&txn.id);
        }
    }
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    ledger: RwLock<Ledger>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ledger: RwLock::new(Ledger::default()),
        }
    }

    /// Load transactions from disk and rebuild the id index
    pub fn load(&self) -> Result<(), CashbookError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut ledger = self
            .ledger
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *ledger = Ledger::default();
        for txn in file_data.transactions {
            ledger.push(txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), CashbookError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Self::write(&self.path, &ledger)
    }

    fn write(path: &Path, ledger: &Ledger) -> Result<(), CashbookError> {
        let file_data = TransactionData {
            transactions: ledger.entries.clone(),
        };
        write_json_atomic(path, &file_data)
    }

    /// Get all transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, CashbookError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ledger.entries.clone())
    }

    /// Append a batch of new transactions and write them to disk
    ///
    /// Either every transaction is stored or none is: if the disk write
    /// fails the in-memory ledger is rolled back.
    pub fn append_all(&self, txns: &[Transaction]) -> Result<(), CashbookError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(dup) = txns.iter().find(|t| ledger.ids.contains(&t.id)) {
            return Err(CashbookError::Storage(format!(
                "Transaction already stored: {}",
                dup.id
            )));
        }

        let rollback_len = ledger.entries.len();
        for txn in txns {
            ledger.push(txn.clone());
        }

        if let Err(e) = Self::write(&self.path, &ledger) {
            ledger.truncate(rollback_len);
            return Err(e);
        }

        Ok(())
    }

    pub fn count(&self) -> Result<usize, CashbookError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ledger.entries.len())
    }
}
