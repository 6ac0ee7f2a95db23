//! Mutations on the month ledger.
//!
//! Every operation takes already-parsed input and returns `true` when it
//! changed the ledger. Non-finite amounts and blank names are ignored rather
//! than reported, so callers can forward raw user input without guarding it.

use crate::{
    config::{CategoryScope, LedgerOptions},
    ledger::{LedgerStore, MonthIndex},
};

pub struct LedgerService;

impl LedgerService {
    /// Adds to the month's income. Negative corrections are allowed.
    pub fn add_income(store: &mut LedgerStore, month: MonthIndex, amount: f64) -> bool {
        if !amount.is_finite() {
            tracing::debug!(month = %month, "ignoring non-finite income");
            return false;
        }
        store.month_mut(month).add_income(amount);
        tracing::debug!(month = %month, amount, "income added");
        true
    }

    /// Charges `amount` to a category, keeping the month expense in step.
    /// Negative corrections may not take the category below zero.
    ///
    /// A missing category is created at zero first when
    /// `implicit_category_creation` is on; otherwise the call is ignored.
    pub fn add_expense(
        store: &mut LedgerStore,
        month: MonthIndex,
        category: &str,
        amount: f64,
        options: &LedgerOptions,
    ) -> bool {
        let name = category.trim();
        if name.is_empty() || !amount.is_finite() {
            tracing::debug!(month = %month, "ignoring malformed expense");
            return false;
        }
        let applied =
            store
                .month_mut(month)
                .add_to_category(name, amount, options.implicit_category_creation);
        if applied {
            tracing::debug!(month = %month, category = name, amount, "expense added");
        } else {
            tracing::debug!(month = %month, category = name, "expense ignored: unknown category or overdrawn correction");
        }
        applied
    }

    /// Creates an empty category, in one month or in all twelve depending on
    /// `scope`. Months that already have the name are left alone.
    pub fn create_category(
        store: &mut LedgerStore,
        month: MonthIndex,
        name: &str,
        scope: CategoryScope,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let created = match scope {
            CategoryScope::CurrentMonthOnly => store.month_mut(month).insert_category(name),
            CategoryScope::AllMonths => store
                .months_mut()
                .fold(false, |created, record| record.insert_category(name) || created),
        };
        if created {
            tracing::debug!(month = %month, category = name, ?scope, "category created");
        }
        created
    }

    /// Removes a category from one month and subtracts its amount from that
    /// month's expense. Other months keep their copy.
    pub fn delete_category(store: &mut LedgerStore, month: MonthIndex, name: &str) -> bool {
        match store.month_mut(month).remove_category(name.trim()) {
            Some(amount) => {
                tracing::debug!(month = %month, category = name.trim(), amount, "category deleted");
                true
            }
            None => false,
        }
    }

    /// Overwrites the month's capitalization snapshot.
    pub fn set_capital(store: &mut LedgerStore, month: MonthIndex, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        store.month_mut(month).set_capital(value);
        tracing::debug!(month = %month, value, "capital set");
        true
    }
}
