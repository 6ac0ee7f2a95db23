//! Persistent ledger options and their JSON file manager.

pub mod manager;
pub mod model;

pub use manager::ConfigManager;
pub use model::{CategoryScope, Config, LedgerOptions};
