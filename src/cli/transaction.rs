//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_created, format_transaction_register};
use crate::error::{CashbookError, CashbookResult};
use crate::models::Money;
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a single income or outcome
    Add {
        /// Transaction title
        title: String,
        /// Value (e.g., "1000" or "12.50")
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// income or outcome
        #[arg(short = 't', long = "type")]
        transaction_type: String,
        /// Category title (created on first use)
        #[arg(short, long)]
        category: String,
    },

    /// List all transactions with the current balance
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> CashbookResult<()> {
    let service = TransactionService::new(storage).with_minimum_value(settings.minimum_value);

    match cmd {
        TransactionCommands::Add {
            title,
            value,
            transaction_type,
            category,
        } => {
            let value = parse_value(&value)?;
            let txn = service.create(CreateTransactionInput {
                title,
                value,
                transaction_type,
                category: category.clone(),
            })?;
            print!("{}", format_transaction_created(&txn, category.trim(), settings));
        }

        TransactionCommands::List { json } => {
            let listing = service.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", format_transaction_register(&listing, settings));
            }
        }
    }

    Ok(())
}

fn parse_value(value: &str) -> CashbookResult<Money> {
    Money::parse(value).map_err(|e| CashbookError::Parse {
        row: None,
        message: format!("value '{}': {}", value, e),
    })
}
