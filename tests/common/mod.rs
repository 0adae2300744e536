#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use exit_ledger::{domain::RecordDraft, ledger::RecordStore, storage::FileStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh, isolated application base directory.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn file_store(base: &Path) -> RecordStore {
    RecordStore::load(Box::new(FileStore::in_base(base).expect("file store")))
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn draft(driver: &str, store: &str, amount: f64, received: f64, date: NaiveDate) -> RecordDraft {
    RecordDraft {
        driver: driver.into(),
        store: store.into(),
        amount,
        received,
        weight: 4.5,
        nfs: 2,
        date,
    }
}
