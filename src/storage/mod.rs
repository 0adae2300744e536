pub mod json_backend;

use std::collections::HashMap;

use crate::errors::Result;

pub use json_backend::FileStore;

/// A named-slot string store: the persisted mirror lives in one slot and is
/// always replaced whole.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
