pub mod allowance_service;
pub mod ledger_service;
pub mod savings_service;
pub mod summary_service;

pub use allowance_service::AllowanceService;
pub use ledger_service::LedgerService;
pub use savings_service::SavingsService;
pub use summary_service::{MonthSummary, SummaryService, YearOverview};

#[cfg(test)]
mod tests;
