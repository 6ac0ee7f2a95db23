//! Application-root state object.
//!
//! [`FinanceTracker`] owns the ledger, budget, and savings state together with
//! the snapshot store and clock. A mutation that changes anything writes the
//! affected snapshot before it becomes visible; if the write fails the state
//! is left as it was. Ignored input writes nothing.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::{
    budget::{Allowance, BudgetConfig},
    config::{Config, LedgerOptions},
    core::{
        clock::{Clock, SystemClock},
        services::{
            AllowanceService, LedgerService, MonthSummary, SavingsService, SummaryService,
            YearOverview,
        },
    },
    errors::{LedgerError, Result},
    input::{parse_amount, parse_count},
    ledger::{LedgerStore, MonthIndex, MonthRecord, MONTHS_PER_YEAR},
    savings::{SavingsGoal, SavingsProgress},
    storage::{
        load_snapshot, save_snapshot, JsonStorage, SnapshotStore, BUDGET_KEY, FINANCE_KEY,
        SAVINGS_KEY,
    },
    utils::paths::resolve_data_dir,
};

pub struct FinanceTracker {
    ledger: LedgerStore,
    budget: Option<BudgetConfig>,
    savings: SavingsGoal,
    options: LedgerOptions,
    storage: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
}

impl FinanceTracker {
    /// Loads every snapshot from `storage`. Missing keys start empty;
    /// unreadable ones are logged and replaced by empty state.
    pub fn open(
        storage: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        options: LedgerOptions,
    ) -> Result<Self> {
        let ledger: LedgerStore = load_or_default(storage.as_ref(), FINANCE_KEY)?;
        let budget: Option<BudgetConfig> = load_or_default(storage.as_ref(), BUDGET_KEY)?;
        let savings: SavingsGoal = load_or_default(storage.as_ref(), SAVINGS_KEY)?;
        tracing::info!(
            budget_configured = budget.is_some(),
            savings_enabled = savings.enabled,
            "finance tracker opened"
        );
        Ok(Self {
            ledger,
            budget,
            savings,
            options,
            storage,
            clock,
        })
    }

    /// Opens the file-backed tracker described by `config` using the system clock.
    pub fn with_config(config: &Config) -> Result<Self> {
        let root = resolve_data_dir(config.data_dir.as_ref());
        let storage = JsonStorage::new(root)?;
        Self::open(Box::new(storage), Box::new(SystemClock), config.ledger)
    }

    pub fn storage(&self) -> &dyn SnapshotStore {
        self.storage.as_ref()
    }

    pub fn options(&self) -> &LedgerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LedgerOptions) {
        self.options = options;
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Month slot of today's date.
    pub fn current_month(&self) -> MonthIndex {
        MonthIndex::of(&self.today())
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn month(&self, month: MonthIndex) -> &MonthRecord {
        self.ledger.month(month)
    }

    pub fn months(&self) -> &[MonthRecord; MONTHS_PER_YEAR] {
        self.ledger.months()
    }

    pub fn budget(&self) -> Option<&BudgetConfig> {
        self.budget.as_ref()
    }

    pub fn savings(&self) -> &SavingsGoal {
        &self.savings
    }

    pub fn month_summary(&self, month: MonthIndex) -> MonthSummary {
        SummaryService::month_summary(&self.ledger, month)
    }

    pub fn year_overview(&self) -> YearOverview {
        SummaryService::year_overview(&self.ledger)
    }

    pub fn savings_progress(&self) -> SavingsProgress {
        self.savings.progress()
    }

    // Ledger mutations

    pub fn add_income(&mut self, month: MonthIndex, amount: f64) -> Result<bool> {
        self.update_ledger(|ledger, _| LedgerService::add_income(ledger, month, amount))
    }

    pub fn add_income_input(&mut self, month: MonthIndex, raw: &str) -> Result<bool> {
        match parse_amount(raw) {
            Some(amount) => self.add_income(month, amount),
            None => Ok(ignored(raw)),
        }
    }

    pub fn add_expense(&mut self, month: MonthIndex, category: &str, amount: f64) -> Result<bool> {
        self.update_ledger(|ledger, options| {
            LedgerService::add_expense(ledger, month, category, amount, options)
        })
    }

    pub fn add_expense_input(
        &mut self,
        month: MonthIndex,
        category: &str,
        raw: &str,
    ) -> Result<bool> {
        match parse_amount(raw) {
            Some(amount) => self.add_expense(month, category, amount),
            None => Ok(ignored(raw)),
        }
    }

    pub fn create_category(&mut self, month: MonthIndex, name: &str) -> Result<bool> {
        self.update_ledger(|ledger, options| {
            LedgerService::create_category(ledger, month, name, options.category_scope)
        })
    }

    pub fn delete_category(&mut self, month: MonthIndex, name: &str) -> Result<bool> {
        self.update_ledger(|ledger, _| LedgerService::delete_category(ledger, month, name))
    }

    pub fn set_capital(&mut self, month: MonthIndex, value: f64) -> Result<bool> {
        self.update_ledger(|ledger, _| LedgerService::set_capital(ledger, month, value))
    }

    pub fn set_capital_input(&mut self, month: MonthIndex, raw: &str) -> Result<bool> {
        match parse_amount(raw) {
            Some(value) => self.set_capital(month, value),
            None => Ok(ignored(raw)),
        }
    }

    // Budget

    /// Starts a new budget today, replacing any previous one and its history.
    pub fn configure_budget(&mut self, total_amount: f64, duration_days: u32) -> Result<bool> {
        let today = self.today();
        self.update_budget(|budget, ledger| {
            AllowanceService::configure(budget, ledger, total_amount, duration_days, today)
        })
    }

    pub fn configure_budget_input(&mut self, total_raw: &str, days_raw: &str) -> Result<bool> {
        match (parse_amount(total_raw), parse_count(days_raw)) {
            (Some(total), Some(days)) => self.configure_budget(total, days),
            _ => Ok(ignored(total_raw)),
        }
    }

    pub fn clear_budget(&mut self) -> Result<bool> {
        self.update_budget(|budget, _| {
            let cleared = budget.take().is_some();
            if cleared {
                tracing::info!("budget cleared");
            }
            cleared
        })
    }

    /// Today's allowance. Records or refreshes today's history entry and
    /// persists it when it changed.
    pub fn allowance(&mut self) -> Result<Allowance> {
        let today = self.today();
        let mut next = self.budget.clone();
        let (allowance, changed) = AllowanceService::current(next.as_mut(), &self.ledger, today);
        if changed {
            save_snapshot(self.storage.as_ref(), BUDGET_KEY, &next)?;
            self.budget = next;
        }
        Ok(allowance)
    }

    // Savings

    pub fn enable_goal(&mut self, name: &str, target: f64) -> Result<bool> {
        self.update_savings(|goal| SavingsService::enable_goal(goal, name, target))
    }

    pub fn enable_goal_input(&mut self, name: &str, target_raw: &str) -> Result<bool> {
        match parse_amount(target_raw) {
            Some(target) => self.enable_goal(name, target),
            None => Ok(ignored(target_raw)),
        }
    }

    pub fn disable_goal(&mut self) -> Result<bool> {
        self.update_savings(SavingsService::disable_goal)
    }

    pub fn deposit(&mut self, amount: f64) -> Result<bool> {
        self.update_savings(|goal| SavingsService::deposit(goal, amount))
    }

    pub fn deposit_input(&mut self, raw: &str) -> Result<bool> {
        match parse_amount(raw) {
            Some(amount) => self.deposit(amount),
            None => Ok(ignored(raw)),
        }
    }

    pub fn reset_goal(&mut self) -> Result<bool> {
        self.update_savings(SavingsService::reset_goal)
    }

    // Updates run on a copy that replaces the live state only after its
    // snapshot is written.

    fn update_ledger(
        &mut self,
        apply: impl FnOnce(&mut LedgerStore, &LedgerOptions) -> bool,
    ) -> Result<bool> {
        let mut next = self.ledger.clone();
        if !apply(&mut next, &self.options) {
            return Ok(false);
        }
        save_snapshot(self.storage.as_ref(), FINANCE_KEY, &next)?;
        self.ledger = next;
        Ok(true)
    }

    fn update_budget(
        &mut self,
        apply: impl FnOnce(&mut Option<BudgetConfig>, &LedgerStore) -> bool,
    ) -> Result<bool> {
        let mut next = self.budget.clone();
        if !apply(&mut next, &self.ledger) {
            return Ok(false);
        }
        save_snapshot(self.storage.as_ref(), BUDGET_KEY, &next)?;
        self.budget = next;
        Ok(true)
    }

    fn update_savings(&mut self, apply: impl FnOnce(&mut SavingsGoal) -> bool) -> Result<bool> {
        let mut next = self.savings.clone();
        if !apply(&mut next) {
            return Ok(false);
        }
        save_snapshot(self.storage.as_ref(), SAVINGS_KEY, &next)?;
        self.savings = next;
        Ok(true)
    }
}

fn ignored(raw: &str) -> bool {
    tracing::trace!(input = raw, "ignoring unparsable input");
    false
}

fn load_or_default<T: DeserializeOwned + Default>(
    storage: &dyn SnapshotStore,
    key: &str,
) -> Result<T> {
    match load_snapshot::<T>(storage, key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(LedgerError::Serde(err)) => {
            tracing::warn!(key, error = %err, "discarding unreadable snapshot");
            Ok(T::default())
        }
        Err(err) => Err(err),
    }
}
