//! User settings for Cashbook
//!
//! Stored as `config.json` in the base directory. Missing fields fall back
//! to their defaults so older files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::CashbookPaths;
use crate::error::CashbookError;
use crate::models::Money;
use crate::services::rules::DEFAULT_MINIMUM_VALUE;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// User settings for Cashbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Smallest value a transaction may carry, in cents
    #[serde(default = "default_minimum_value")]
    pub minimum_value: Money,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_minimum_value() -> Money {
    DEFAULT_MINIMUM_VALUE
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            minimum_value: default_minimum_value(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashbookPaths) -> Result<Self, CashbookError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CashbookError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| CashbookError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashbookPaths) -> Result<(), CashbookError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CashbookError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CashbookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the services cannot honour
    pub fn validate(&self) -> Result<(), CashbookError> {
        if self.minimum_value < Money::from_cents(1) {
            return Err(CashbookError::Config(format!(
                "minimum_value must be at least one cent, got {} cents",
                self.minimum_value.cents()
            )));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(CashbookError::Config(format!(
                "unsupported log_level '{}'; expected one of {}",
                self.log_level,
                LOG_LEVELS.join("|")
            )));
        }

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
