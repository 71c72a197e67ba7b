#![doc(test(attr(deny(warnings))))]

//! Caixa Core implements the bookkeeping primitives behind a household +
//! two-MEI dashboard: the 16th-to-15th fiscal calendar, the flat transaction
//! ledger, and the pure aggregations (balances, card invoices, fixed-expense
//! status) derived from it.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod fiscal;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Caixa Core tracing initialized.");
    });
}
