use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cashbook::cli::{
    handle_balance_command, handle_category_command, handle_import_command,
    handle_transaction_command, CategoryCommands, TransactionCommands,
};
use cashbook::config::{paths::CashbookPaths, settings::Settings};
use cashbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "cashbook",
    version,
    about = "Income and outcome ledger that never goes negative",
    long_about = "Cashbook records income and outcome transactions filed under \
                  categories. Outcomes the balance cannot cover are rejected, and \
                  CSV imports are applied all-or-nothing."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Import transactions from a CSV file (title,type,value,category)
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Show income, outcome and total
    Balance {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CashbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Cashbook at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'cashbook transaction add --help' to record your first transaction.");
        }
        Some(Commands::Config) => {
            println!("Cashbook Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Minimum value:   {}", settings.format_money(settings.minimum_value));
            println!("  Log level:       {}", settings.log_level);
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &settings, &file)?;
        }
        Some(Commands::Balance { json }) => {
            handle_balance_command(&storage, &settings, json)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        None => {
            println!("Cashbook - income and outcome ledger");
            println!();
            println!("Run 'cashbook --help' for usage information.");
        }
    }

    Ok(())
}
