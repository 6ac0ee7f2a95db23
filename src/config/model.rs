use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Persistent preferences for the ledger core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerOptions,

    /// Optional custom root directory for snapshots. Defaults to `~/.monthly_ledger`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Policies applied by the ledger mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerOptions {
    #[serde(default)]
    pub category_scope: CategoryScope,
    #[serde(default = "LedgerOptions::default_implicit_category_creation")]
    pub implicit_category_creation: bool,
}

impl LedgerOptions {
    fn default_implicit_category_creation() -> bool {
        true
    }
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            category_scope: CategoryScope::default(),
            implicit_category_creation: Self::default_implicit_category_creation(),
        }
    }
}

/// Where a newly created category appears.
///
/// Deletion is always limited to the month it is requested for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryScope {
    #[default]
    CurrentMonthOnly,
    AllMonths,
}
