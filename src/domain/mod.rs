pub mod record;

pub use record::{ExpenseRecord, RecordDraft, RecordId};
