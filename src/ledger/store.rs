use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{ExpenseRecord, RecordDraft, RecordId};
use crate::errors::{LedgerError, Result};
use crate::storage::KeyValueStore;

/// Slot holding the serialized record sequence.
pub const STORAGE_KEY: &str = "expenses";

/// Owns the ordered record sequence (newest first) and mirrors it to the
/// backend after every mutation.
pub struct RecordStore {
    records: Vec<ExpenseRecord>,
    backend: Box<dyn KeyValueStore>,
}

impl RecordStore {
    /// Rehydrates from the persisted mirror. An absent, unreadable or corrupt
    /// mirror yields an empty store.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let records = match backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ExpenseRecord>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "persisted records are corrupt; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "persisted records unreadable; starting empty");
                Vec::new()
            }
        };
        info!(count = records.len(), "record store loaded");
        Self { records, backend }
    }

    pub fn add(&mut self, draft: RecordDraft) -> Result<RecordId> {
        self.add_at(draft, Utc::now().timestamp_millis())
    }

    /// Adds a record using `now_millis` as the id source.
    ///
    /// Non-finite amounts are rejected: JSON has no encoding for them and a
    /// single one would make the whole mirror unreadable. If the mirror
    /// cannot be written the insert is undone.
    pub fn add_at(&mut self, draft: RecordDraft, now_millis: i64) -> Result<RecordId> {
        for (field, value) in [
            ("valor pago", draft.amount),
            ("valor recebido", draft.received),
            ("peso", draft.weight),
        ] {
            if !value.is_finite() {
                return Err(LedgerError::InvalidInput(format!(
                    "{field} precisa ser um número finito"
                )));
            }
        }

        let id = self.next_id(now_millis);
        self.records.insert(0, ExpenseRecord::from_draft(id, draft));
        if let Err(err) = self.persist() {
            self.records.remove(0);
            warn!(id, error = %err, "record not saved; insert undone");
            return Err(err);
        }
        info!(id, "record added");
        Ok(id)
    }

    /// Removes the record with `id`. Returns `false` and leaves the mirror
    /// untouched when nothing matches. A failed write puts the record back.
    pub fn remove(&mut self, id: RecordId) -> Result<bool> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };
        let removed = self.records.remove(index);
        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            warn!(id, error = %err, "removal not saved; record restored");
            return Err(err);
        }
        info!(id, "record removed");
        Ok(true)
    }

    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct drivers, sorted, for the driver selector.
    pub fn drivers(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| record.driver.as_str()))
    }

    /// Distinct stores, sorted, for the store selector.
    pub fn stores(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| record.store.as_str()))
    }

    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    fn next_id(&self, now_millis: i64) -> RecordId {
        match self.records.iter().map(|record| record.id).max() {
            Some(highest) if highest >= now_millis => highest + 1,
            _ => now_millis,
        }
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        self.backend.set(STORAGE_KEY, &json)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
