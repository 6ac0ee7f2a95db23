//! Read-side aggregates for the presentation layer.

use crate::ledger::{LedgerStore, MonthIndex, MONTHS_PER_YEAR};

/// Headline figures for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthIndex,
    pub income: f64,
    pub expense: f64,
    pub capital: f64,
    /// `income - expense`, negative when overspent.
    pub remaining: f64,
    /// Share of income left, in whole percent (rounded half up); 0 without income.
    pub remaining_percent: i64,
}

impl MonthSummary {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

/// Per-month series for the yearly report.
#[derive(Debug, Clone, PartialEq)]
pub struct YearOverview {
    pub income: [f64; MONTHS_PER_YEAR],
    pub expense: [f64; MONTHS_PER_YEAR],
    pub capital: [f64; MONTHS_PER_YEAR],
}

impl YearOverview {
    pub fn total_income(&self) -> f64 {
        self.income.iter().sum()
    }

    pub fn total_expense(&self) -> f64 {
        self.expense.iter().sum()
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn month_summary(store: &LedgerStore, month: MonthIndex) -> MonthSummary {
        let record = store.month(month);
        let remaining = record.income() - record.expense();
        let remaining_percent = if record.income() > 0.0 {
            round_half_up(remaining / record.income() * 100.0)
        } else {
            0
        };
        MonthSummary {
            month,
            income: record.income(),
            expense: record.expense(),
            capital: record.capital(),
            remaining,
            remaining_percent,
        }
    }

    pub fn year_overview(store: &LedgerStore) -> YearOverview {
        let mut overview = YearOverview {
            income: [0.0; MONTHS_PER_YEAR],
            expense: [0.0; MONTHS_PER_YEAR],
            capital: [0.0; MONTHS_PER_YEAR],
        };
        for (index, record) in store.iter() {
            overview.income[index.get()] = record.income();
            overview.expense[index.get()] = record.expense();
            overview.capital[index.get()] = record.capital();
        }
        overview
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
