//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_category_table;
use crate::error::CashbookResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their totals
    List,
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> CashbookResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let summaries = service.summaries()?;
            print!("{}", format_category_table(&summaries, settings));
        }
    }

    Ok(())
}
