//! Month ledger models: the twelve month slots and their invariants.

pub mod month;
pub mod store;

pub use month::{MonthIndex, MonthRecord, MONTHS_PER_YEAR};
pub use store::LedgerStore;
