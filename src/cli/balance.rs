//! Balance CLI command

use crate::config::settings::Settings;
use crate::display::format_balance;
use crate::error::CashbookResult;
use crate::services::BalanceService;
use crate::storage::Storage;

/// Handle the balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    json: bool,
) -> CashbookResult<()> {
    let balance = BalanceService::new(storage).current()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balance)?);
    } else {
        print!("{}", format_balance(&balance, settings));
    }
    Ok(())
}
