use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".monthly_ledger";
const HOME_ENV: &str = "MONTHLY_LEDGER_HOME";

/// Returns the application data directory, defaulting to `~/.monthly_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Data directory for a configuration, preferring its explicit override.
pub fn resolve_data_dir(custom: Option<&PathBuf>) -> PathBuf {
    custom.cloned().unwrap_or_else(app_data_dir)
}
