//! Daily-spending budget configuration and allowance results.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::MonthIndex;

const HISTORY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A fixed total budget spread over a fixed number of days.
///
/// Only valid inside the calendar month of `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub total_amount: f64,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub daily_history: BTreeMap<String, DailySnapshot>,
}

impl BudgetConfig {
    pub fn new(total_amount: f64, duration_days: u32, start_date: NaiveDate) -> Self {
        Self {
            total_amount,
            duration_days,
            start_date,
            daily_history: BTreeMap::new(),
        }
    }

    /// Ledger month whose expense is charged against this budget.
    pub fn month(&self) -> MonthIndex {
        MonthIndex::of(&self.start_date)
    }

    /// Days since the start, counting the start day as day 1.
    pub fn elapsed_days(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days() + 1
    }

    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        i64::from(self.duration_days) - self.elapsed_days(today) + 1
    }

    pub fn is_same_month(&self, today: NaiveDate) -> bool {
        today.year() == self.start_date.year() && today.month() == self.start_date.month()
    }

    /// `true` while `today` is inside `[start, start + duration)` and the
    /// calendar month has not rolled over.
    pub fn is_in_window(&self, today: NaiveDate) -> bool {
        today >= self.start_date && self.is_same_month(today) && self.remaining_days(today) > 0
    }

    pub fn snapshot(&self, date: NaiveDate) -> Option<&DailySnapshot> {
        self.daily_history.get(&history_key(date))
    }
}

/// ISO date key used in `daily_history`.
pub fn history_key(date: NaiveDate) -> String {
    date.format(HISTORY_KEY_FORMAT).to_string()
}

/// Audit entry for one day of an active budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    /// Allowance computed by the first query of the day; never recomputed.
    pub daily_budget: f64,
    /// Month expense recorded since the first query of the day.
    pub spent_today: f64,
    /// Month expense at the moment the snapshot was taken.
    #[serde(default)]
    pub opening_expense: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowanceStatus {
    NotSet,
    Active,
    Exhausted,
    Expired,
}

impl AllowanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AllowanceStatus::NotSet => "not set",
            AllowanceStatus::Active => "active",
            AllowanceStatus::Exhausted => "exhausted",
            AllowanceStatus::Expired => "expired",
        }
    }

    /// Whether the budget window covers today (active or exhausted).
    pub fn in_window(self) -> bool {
        matches!(self, AllowanceStatus::Active | AllowanceStatus::Exhausted)
    }
}

/// Result of an allowance query.
#[derive(Debug, Clone, PartialEq)]
pub struct Allowance {
    pub status: AllowanceStatus,
    /// Amount safe to spend today; zero unless `status` is `Active`.
    pub daily_budget: f64,
    pub remaining_amount: f64,
    pub remaining_days: i64,
    pub today: Option<DailySnapshot>,
}

impl Allowance {
    pub fn not_set() -> Self {
        Self::inactive(AllowanceStatus::NotSet)
    }

    pub fn expired() -> Self {
        Self::inactive(AllowanceStatus::Expired)
    }

    fn inactive(status: AllowanceStatus) -> Self {
        Self {
            status,
            daily_budget: 0.0,
            remaining_amount: 0.0,
            remaining_days: 0,
            today: None,
        }
    }
}
