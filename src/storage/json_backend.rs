use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    utils::fs::{ensure_dir, write_atomic},
};

use super::SnapshotStore;

const SNAPSHOT_EXTENSION: &str = "json";

/// File-backed snapshot store: one `<key>.json` file per key under `root`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), SNAPSHOT_EXTENSION))
    }
}

impl SnapshotStore for JsonStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.snapshot_path(key), value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.snapshot_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Keeps keys usable as file names; the fixed snapshot keys pass through unchanged.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "snapshot".into()
    } else {
        sanitized
    }
}
