//! Balance display formatting

use crate::config::settings::Settings;
use crate::models::Balance;

/// Format a balance as a three-line block
pub fn format_balance(balance: &Balance, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:  {:>14}\n", settings.format_money(balance.income)));
    output.push_str(&format!("Outcome: {:>14}\n", settings.format_money(balance.outcome)));
    output.push_str(&"-".repeat(23));
    output.push('\n');
    output.push_str(&format!("Total:   {:>14}\n", settings.format_money(balance.total)));
    output
}
