//! Derived ledger balance
//!
//! A `Balance` is never stored. It is recomputed from the transaction set,
//! or carried forward row by row while a batch is being validated.

use serde::Serialize;
use std::ops::Add;

use super::money::Money;
use crate::error::{CashbookError, CashbookResult};
use super::transaction::{Transaction, TransactionType};

/// Aggregate income, outcome and net total of a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Balance {
    pub income: Money,
    pub outcome: Money,
    /// Always `income - outcome`
    pub total: Money,
}

impl Balance {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Compute the balance of a transaction set
    ///
    /// Order of the input does not matter. Every persisted set was admitted
    /// through [`Balance::record`], so its sums fit.
    pub fn compute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::zero(), |mut balance, txn| {
                match txn.transaction_type {
                    TransactionType::Income => balance.record_income(txn.value),
                    TransactionType::Outcome => balance.record_outcome(txn.value),
                }
                balance
            })
    }

    /// Apply one transaction to the running balance with overflow checks
    ///
    /// On overflow the balance is left unchanged and the error carries `row`.
    pub fn record(
        &mut self,
        transaction_type: TransactionType,
        value: Money,
        row: Option<usize>,
    ) -> CashbookResult<()> {
        let next = match transaction_type {
            TransactionType::Income => self.income.checked_add(value).and_then(|income| {
                Some(Self {
                    income,
                    outcome: self.outcome,
                    total: self.total.checked_add(value)?,
                })
            }),
            TransactionType::Outcome => self.outcome.checked_add(value).and_then(|outcome| {
                Some(Self {
                    income: self.income,
                    outcome,
                    total: self.total.checked_sub(value)?,
                })
            }),
        };

        *self = next.ok_or(CashbookError::BalanceOverflow { value, row })?;
        Ok(())
    }

    pub fn record_income(&mut self, value: Money) {
        self.income += value;
        self.total += value;
    }

    pub fn record_outcome(&mut self, value: Money) {
        self.outcome += value;
        self.total -= value;
    }

    /// Whether an outcome of `value` fits in the available total
    pub fn covers(&self, value: Money) -> bool {
        value <= self.total
    }
}

impl Add for Balance {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            income: self.income + other.income,
            outcome: self.outcome + other.outcome,
            total: self.total + other.total,
        }
    }
}
