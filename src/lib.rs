#![doc(test(attr(deny(warnings))))]

//! Monthly Ledger tracks income, categorized expenses, and a capitalization
//! balance for each calendar month, derives a self-levelling daily spending
//! allowance from a fixed budget, and follows a single savings goal.
//!
//! [`core::FinanceTracker`] is the entry point for embedding applications.

pub mod budget;
pub mod config;
pub mod core;
pub mod errors;
pub mod input;
pub mod ledger;
pub mod savings;
pub mod storage;
pub mod utils;

pub use crate::core::FinanceTracker;
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Monthly Ledger tracing initialized.");
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
