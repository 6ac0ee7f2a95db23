//! Daily allowance derivation for a fixed budget.
//!
//! Whatever is left of the budget is spread evenly over the days left in the
//! window, recomputed on every query. Spending is read live from the ledger
//! month of the budget's start date.

use chrono::NaiveDate;

use crate::{
    budget::{history_key, Allowance, AllowanceStatus, BudgetConfig, DailySnapshot},
    ledger::LedgerStore,
};

pub struct AllowanceService;

impl AllowanceService {
    /// Replaces `slot` with a fresh budget starting `today` and seeds today's
    /// history entry. Ignored unless the amount is positive and finite and
    /// the duration is at least one day.
    pub fn configure(
        slot: &mut Option<BudgetConfig>,
        store: &LedgerStore,
        total_amount: f64,
        duration_days: u32,
        today: NaiveDate,
    ) -> bool {
        if !total_amount.is_finite() || total_amount <= 0.0 || duration_days == 0 {
            tracing::debug!(total_amount, duration_days, "ignoring invalid budget configuration");
            return false;
        }
        let config = slot.insert(BudgetConfig::new(total_amount, duration_days, today));
        Self::query(config, store, today);
        tracing::info!(total_amount, duration_days, start = %today, "budget configured");
        true
    }

    /// Computes the allowance for `today` without touching the history.
    pub fn assess(config: &BudgetConfig, store: &LedgerStore, today: NaiveDate) -> Allowance {
        if !config.is_in_window(today) {
            return Allowance {
                today: config.snapshot(today).cloned(),
                ..Allowance::expired()
            };
        }
        let remaining_days = config.remaining_days(today);
        let spent = store.month(config.month()).expense();
        let remaining_amount = config.total_amount - spent;
        let (status, daily_budget) = if remaining_amount <= 0.0 {
            (AllowanceStatus::Exhausted, 0.0)
        } else {
            (AllowanceStatus::Active, remaining_amount / remaining_days as f64)
        };
        Allowance {
            status,
            daily_budget,
            remaining_amount,
            remaining_days,
            today: config.snapshot(today).cloned(),
        }
    }

    /// Computes the allowance and records today's snapshot.
    ///
    /// The first query of a day freezes `daily_budget`; later queries only
    /// refresh `spent_today`. Returns the allowance and whether the history
    /// changed.
    pub fn query(
        config: &mut BudgetConfig,
        store: &LedgerStore,
        today: NaiveDate,
    ) -> (Allowance, bool) {
        let mut allowance = Self::assess(config, store, today);
        if !allowance.status.in_window() {
            return (allowance, false);
        }
        let live_expense = store.month(config.month()).expense();
        let snapshot = config
            .daily_history
            .entry(history_key(today))
            .or_insert_with(|| {
                tracing::debug!(date = %today, daily_budget = allowance.daily_budget, "daily snapshot recorded");
                DailySnapshot {
                    daily_budget: allowance.daily_budget,
                    spent_today: 0.0,
                    opening_expense: live_expense,
                }
            });
        let spent_today = live_expense - snapshot.opening_expense;
        let before = allowance.today.as_ref();
        snapshot.spent_today = spent_today;
        let changed = before != Some(&*snapshot);
        allowance.today = Some(snapshot.clone());
        (allowance, changed)
    }

    /// Like [`AllowanceService::query`], reporting `NotSet` when no budget
    /// is configured.
    pub fn current(
        config: Option<&mut BudgetConfig>,
        store: &LedgerStore,
        today: NaiveDate,
    ) -> (Allowance, bool) {
        match config {
            Some(config) => Self::query(config, store, today),
            None => (Allowance::not_set(), false),
        }
    }
}
