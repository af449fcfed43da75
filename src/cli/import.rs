//! CLI command handler for CSV import

use std::path::Path;

use crate::config::settings::Settings;
use crate::display::format_import_summary;
use crate::error::CashbookResult;
use crate::services::{ImportService, ImportSummary};
use crate::storage::Storage;

/// Handle the import command
///
/// Either every row is imported or none is; on rejection the error names
/// the offending row.
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    file: &Path,
) -> CashbookResult<()> {
    let imported = ImportService::new(storage)
        .with_minimum_value(settings.minimum_value)
        .import_file(file)?;

    let summary = ImportSummary::from_transactions(&imported);
    print!("{}", format_import_summary(&summary, settings));
    Ok(())
}
