use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};
use crate::utils::paths::{self, ensure_dir, write_atomic};

use super::KeyValueStore;

const SLOT_EXTENSION: &str = "json";

/// Keeps each slot in `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Store rooted in the data directory under `base`.
    pub fn in_base(base: &Path) -> Result<Self> {
        Self::new(paths::data_dir_in(base))
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), SLOT_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key);
        write_atomic(&path, value).map_err(|err| {
            LedgerError::Storage(format!("não foi possível gravar `{}`: {err}", path.display()))
        })
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "slot".into()
    } else {
        sanitized
    }
}
