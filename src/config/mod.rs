//! Configuration module for Cashbook
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CashbookPaths;
pub use settings::Settings;
