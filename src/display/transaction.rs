//! Transaction display formatting
//!
//! Register tables for `transaction list` and the one-line confirmations
//! printed after adding or importing.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Transaction;
use crate::services::{ImportSummary, TransactionListing};

use super::balance::format_balance;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    transaction_type: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format the transaction register followed by the balance
pub fn format_transaction_register(listing: &TransactionListing, settings: &Settings) -> String {
    let mut output = String::new();

    if listing.transactions.is_empty() {
        output.push_str("No transactions found.\n");
    } else {
        let rows = listing.transactions.iter().map(|entry| {
            let txn = &entry.transaction;
            RegisterRow {
                id: txn.id.short(),
                title: truncate(&txn.title, 30),
                transaction_type: txn.transaction_type.to_string(),
                value: settings.format_money(txn.signed_value()),
                category: entry
                    .category_title
                    .clone()
                    .unwrap_or_else(|| "(unknown)".to_string()),
            }
        });
        output.push_str(&Table::new(rows).with(Style::modern()).to_string());
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_balance(&listing.balance, settings));
    output
}

/// Confirmation for a single created transaction
pub fn format_transaction_created(
    txn: &Transaction,
    category: &str,
    settings: &Settings,
) -> String {
    format!(
        "Recorded {} '{}' of {} in {} ({})\n",
        txn.transaction_type,
        txn.title,
        settings.format_money(txn.value),
        category,
        txn.id.short()
    )
}

/// Summary printed after a successful import
pub fn format_import_summary(summary: &ImportSummary, settings: &Settings) -> String {
    if summary.imported == 0 {
        return "No transactions found in CSV file.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Imported {} transactions\n", summary.imported));
    output.push_str(&format!("  Income:  {:>12}\n", settings.format_money(summary.income)));
    output.push_str(&format!("  Outcome: {:>12}\n", settings.format_money(summary.outcome)));
    output
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
