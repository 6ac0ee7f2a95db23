#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use monthly_ledger::{
    config::LedgerOptions,
    core::{FinanceTracker, ManualClock},
    ledger::MonthIndex,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn month(index: u8) -> MonthIndex {
    MonthIndex::new(index).expect("valid month index")
}

/// Opens a file-backed tracker under `dir` whose clock the test controls.
pub fn open_tracker(dir: &Path, clock: &ManualClock, options: LedgerOptions) -> FinanceTracker {
    let storage = JsonStorage::new(dir.to_path_buf()).expect("create json storage backend");
    FinanceTracker::open(Box::new(storage), Box::new(clock.clone()), options)
        .expect("open tracker")
}
