//! Custom error types for Cashbook
//!
//! Domain-rule violations (bad type, bad value, overdraft, malformed CSV)
//! are kept apart from infrastructure failures so callers can tell a
//! rejected request from a broken store.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Cashbook operations
#[derive(Error, Debug)]
pub enum CashbookError {
    /// Transaction type is neither `income` nor `outcome`
    #[error(
        "Invalid transaction type '{transaction_type}': expected income or outcome{}",
        row_suffix(.row)
    )]
    InvalidType {
        transaction_type: String,
        row: Option<usize>,
    },

    /// Transaction value is below the accepted minimum
    #[error("Invalid transaction value {value}: must be at least {minimum}{}", row_suffix(.row))]
    InvalidValue {
        value: Money,
        minimum: Money,
        row: Option<usize>,
    },

    /// Outcome exceeds the available total
    #[error("Insufficient funds: need {needed}, have {available}{}", row_suffix(.row))]
    InsufficientFunds {
        needed: Money,
        available: Money,
        row: Option<usize>,
    },

    /// Recording the amount would push a balance past the representable range
    #[error("Amount {value} would overflow the balance{}", row_suffix(.row))]
    BalanceOverflow { value: Money, row: Option<usize> },

    /// Malformed tabular input
    #[error("Parse error{}: {message}", row_suffix(.row))]
    Parse { row: Option<usize>, message: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" (row {})", row),
        None => String::new(),
    }
}

impl CashbookError {
    /// Create a parse error tied to a data row
    pub fn parse_at(row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            row: Some(row),
            message: message.into(),
        }
    }

    /// Check if this error is a domain-rule rejection rather than an
    /// infrastructure failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidType { .. }
                | Self::InvalidValue { .. }
                | Self::InsufficientFunds { .. }
                | Self::BalanceOverflow { .. }
                | Self::Parse { .. }
        )
    }

    /// The 1-based import row this error refers to, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidType { row, .. }
            | Self::InvalidValue { row, .. }
            | Self::InsufficientFunds { row, .. }
            | Self::BalanceOverflow { row, .. }
            | Self::Parse { row, .. } => *row,
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CashbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CashbookError {
    fn from(err: csv::Error) -> Self {
        // Record positions from csv count the header line, data rows do not
        let row = err
            .position()
            .map(|pos| pos.record() as usize)
            .filter(|&record| record > 0);
        Self::Parse {
            row,
            message: err.to_string(),
        }
    }
}

/// Result type alias for Cashbook operations
pub type CashbookResult<T> = Result<T, CashbookError>;
