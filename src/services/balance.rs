//! Balance service
//!
//! Computes the current balance over every persisted transaction.

use crate::error::CashbookResult;
use crate::models::Balance;
use crate::storage::LedgerStore;

/// Service for balance queries
pub struct BalanceService<'a, S: LedgerStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> BalanceService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Balance of the full persisted transaction set
    pub fn current(&self) -> CashbookResult<Balance> {
        let transactions = self.store.find_all_transactions()?;
        Ok(Balance::compute(&transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, Transaction, TransactionType};
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_store_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(BalanceService::new(&store).current().unwrap(), Balance::zero());
    }

    #[test]
    fn test_current_balance() {
        let category = Category::new("Misc");
        let store = MemoryStore::with_records(
            vec![category.clone()],
            vec![
                Transaction::new(
                    "In",
                    Money::from_units(300),
                    TransactionType::Income,
                    category.id,
                ),
                Transaction::new(
                    "Out",
                    Money::from_units(120),
                    TransactionType::Outcome,
                    category.id,
                ),
            ],
        );

        let balance = BalanceService::new(&store).current().unwrap();
        assert_eq!(balance.income, Money::from_units(300));
        assert_eq!(balance.outcome, Money::from_units(120));
        assert_eq!(balance.total, Money::from_units(180));
    }
}
