//! Key/value snapshot persistence for ledger, budget, and savings state.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

/// Key holding the serialized twelve-month ledger.
pub const FINANCE_KEY: &str = "financeData";
/// Key holding the serialized budget configuration (or `null`).
pub const BUDGET_KEY: &str = "budgetData";
/// Key holding the serialized savings goal.
pub const SAVINGS_KEY: &str = "savingsData";

/// Abstraction over durable string snapshots addressed by key.
pub trait SnapshotStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads and deserializes the snapshot under `key`, if one exists.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn SnapshotStore, key: &str) -> Result<Option<T>> {
    match store.read(key)? {
        Some(data) => Ok(Some(serde_json::from_str(&data)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and writes it under `key`.
pub fn save_snapshot<T: Serialize + ?Sized>(
    store: &dyn SnapshotStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.write(key, &json)
}
