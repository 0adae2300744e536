//! Record store, filter engine and aggregator.

pub mod aggregate;
pub mod filter;
pub mod store;

pub use aggregate::{aggregate, ProfitTone, Totals};
pub use filter::{apply, FilterCriteria};
pub use store::{RecordStore, STORAGE_KEY};
