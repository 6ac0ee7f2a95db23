//! Ledger mutation, budget evaluation, and the application-root tracker.

pub mod clock;
pub mod services;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use tracker::FinanceTracker;
