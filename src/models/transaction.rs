//! Transaction model
//!
//! A transaction moves a positive amount either into the ledger (income)
//! or out of it (outcome), and always belongs to one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Outcome,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither transaction type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type '{0}'")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    /// Only the exact lowercase names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "outcome" => Ok(Self::Outcome),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Free-form description
    pub title: String,

    /// Amount moved, always positive
    pub value: Money,

    /// Income or outcome
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// The category this transaction belongs to
    pub category_id: CategoryId,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Construct a new, unsaved transaction
    pub fn new(
        title: impl Into<String>,
        value: Money,
        transaction_type: TransactionType,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            title: title.into(),
            value,
            transaction_type,
            category_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_outcome(&self) -> bool {
        self.transaction_type == TransactionType::Outcome
    }

    /// Effect of this transaction on the ledger total
    pub fn signed_value(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.value,
            TransactionType::Outcome => -self.value,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.created_at.format("%Y-%m-%d"),
            self.title,
            self.signed_value()
        )
    }
}
