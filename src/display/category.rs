//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::services::CategorySummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    title: String,
    #[tabled(rename = "Transactions")]
    transactions: usize,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Format categories with their per-category totals
pub fn format_category_table(summaries: &[CategorySummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No categories yet. They are created when first used.\n".to_string();
    }

    let rows = summaries.iter().map(|summary| CategoryRow {
        title: summary.category.title.clone(),
        transactions: summary.transaction_count,
        income: settings.format_money(summary.balance.income),
        outcome: settings.format_money(summary.balance.outcome),
        net: settings.format_money(summary.balance.total),
    });

    let mut output = Table::new(rows).with(Style::modern()).to_string();
    output.push('\n');
    output
}
