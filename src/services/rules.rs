//! Ledger rules shared by single creation and bulk import
//!
//! `row` is the 1-based import row being checked, or `None` for a single
//! transaction.

use crate::error::{CashbookError, CashbookResult};
use crate::models::{Balance, Money, TransactionType};

/// Smallest accepted transaction value unless configured otherwise
pub const DEFAULT_MINIMUM_VALUE: Money = Money::from_units(1);

/// Parse the transaction type, rejecting anything but income/outcome
pub fn check_type(transaction_type: &str, row: Option<usize>) -> CashbookResult<TransactionType> {
    transaction_type
        .parse()
        .map_err(|_| CashbookError::InvalidType {
            transaction_type: transaction_type.to_string(),
            row,
        })
}

/// Reject values below the minimum
pub fn check_value(value: Money, minimum: Money, row: Option<usize>) -> CashbookResult<()> {
    if value < minimum {
        return Err(CashbookError::InvalidValue {
            value,
            minimum,
            row,
        });
    }
    Ok(())
}

/// Reject an outcome the balance cannot cover
pub fn check_funds(balance: &Balance, value: Money, row: Option<usize>) -> CashbookResult<()> {
    if !balance.covers(value) {
        return Err(CashbookError::InsufficientFunds {
            needed: value,
            available: balance.total,
            row,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_type() {
        assert_eq!(check_type("income", None).unwrap(), TransactionType::Income);
        assert_eq!(check_type("outcome", None).unwrap(), TransactionType::Outcome);

        let err = check_type("transfer", Some(4)).unwrap_err();
        assert!(matches!(
            err,
            CashbookError::InvalidType { ref transaction_type, row: Some(4) }
                if transaction_type == "transfer"
        ));
    }

    #[test]
    fn test_check_value_boundaries() {
        let minimum = DEFAULT_MINIMUM_VALUE;
        assert!(check_value(Money::from_cents(100), minimum, None).is_ok());
        assert!(check_value(Money::from_cents(99), minimum, None).is_err());
        assert!(check_value(Money::zero(), minimum, None).is_err());
        assert!(check_value(Money::from_units(-5), minimum, None).is_err());

        // A one-cent floor still rejects zero
        let cent = Money::from_cents(1);
        assert!(check_value(cent, cent, None).is_ok());
        assert!(check_value(Money::zero(), cent, None).is_err());
    }

    #[test]
    fn test_check_funds() {
        let mut balance = Balance::zero();
        balance.record_income(Money::from_units(50));

        let err = check_funds(&balance, Money::from_units(100), None).unwrap_err();
        assert!(matches!(
            err,
            CashbookError::InsufficientFunds { needed, available, row: None }
                if needed == Money::from_units(100) && available == Money::from_units(50)
        ));
        assert!(check_funds(&balance, Money::from_units(50), None).is_ok());
    }
}
