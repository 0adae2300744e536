#![doc(test(attr(deny(warnings))))]

//! Exit Ledger tracks delivery exits (driver, store, paid, received, weight,
//! invoices, date) in a persisted key-value slot, with filtering, totals and
//! a WhatsApp message helper.

pub mod cli;
pub mod config;
pub mod currency;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod messaging;
pub mod render;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Exit Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
