use monthly_ledger::{
    budget::AllowanceStatus,
    config::LedgerOptions,
    core::ManualClock,
    savings::SavingsGoal,
    storage::{JsonStorage, MemoryStorage, SnapshotStore, BUDGET_KEY, FINANCE_KEY, SAVINGS_KEY},
    FinanceTracker, LedgerError,
};
use std::{
    fs, io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

mod common;
use common::{date, month, open_tracker, temp_data_dir};

#[test]
fn state_survives_reopen() {
    let dir = temp_data_dir();
    let clock = ManualClock::new(date(2025, 6, 1));
    {
        let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());
        tracker.add_income(month(5), 3200.0).unwrap();
        tracker.add_expense(month(5), "food", 150.0).unwrap();
        tracker.set_capital(month(5), 10_000.0).unwrap();
        tracker.configure_budget(3000.0, 10).unwrap();
        tracker.enable_goal("Car", 1000.0).unwrap();
        tracker.deposit(250.0).unwrap();
    }

    let reopened = open_tracker(&dir, &clock, LedgerOptions::default());
    let june = reopened.month(month(5));
    assert_eq!(june.income(), 3200.0);
    assert_eq!(june.expense(), 150.0);
    assert_eq!(june.category("food"), Some(150.0));
    assert_eq!(june.capital(), 10_000.0);

    let budget = reopened.budget().expect("budget persisted");
    assert_eq!(budget.total_amount, 3000.0);
    assert_eq!(budget.start_date, date(2025, 6, 1));
    assert!(budget.snapshot(date(2025, 6, 1)).is_some());

    assert_eq!(reopened.savings().current, 250.0);
    assert!(reopened.savings().enabled);
}

#[test]
fn every_mutation_is_written_immediately() {
    let dir = temp_data_dir();
    let clock = ManualClock::new(date(2025, 6, 1));
    let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());
    let storage = JsonStorage::new(dir.clone()).unwrap();

    assert!(storage.read(FINANCE_KEY).unwrap().is_none());
    tracker.add_income(month(0), 10.0).unwrap();
    let raw = storage.read(FINANCE_KEY).unwrap().expect("ledger written");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["0"]["income"], 10.0);
    assert_eq!(value.as_object().unwrap().len(), 12);
}

#[test]
fn ignored_input_writes_nothing() {
    let dir = temp_data_dir();
    let clock = ManualClock::new(date(2025, 6, 1));
    let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());

    assert!(!tracker.add_income_input(month(0), "abc").unwrap());
    assert!(!tracker.deposit_input("50").unwrap());
    assert!(!tracker.configure_budget_input("lots", "10").unwrap());

    let storage = JsonStorage::new(dir.clone()).unwrap();
    for key in [FINANCE_KEY, BUDGET_KEY, SAVINGS_KEY] {
        assert!(storage.read(key).unwrap().is_none(), "{key} should not exist");
    }
}

#[test]
fn reads_snapshots_written_by_the_browser_app() {
    let dir = temp_data_dir();
    fs::write(
        dir.join("financeData.json"),
        r#"{"0":{"income":50000,"expense":1500,"categories":{"Еда":1000,"Транспорт":500},"capital":0},
            "1":{"income":0,"expense":0,"categories":{}}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("budgetData.json"),
        r#"{"totalAmount":3000,"durationDays":10,"startDate":"2025-01-05",
            "dailyHistory":{"2025-01-05":{"dailyBudget":300,"spentToday":0}}}"#,
    )
    .unwrap();
    fs::write(
        dir.join("savingsData.json"),
        r#"{"enabled":true,"name":"Отпуск","goal":100000,"current":2500}"#,
    )
    .unwrap();

    let clock = ManualClock::new(date(2025, 1, 6));
    let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());
    assert_eq!(tracker.month(month(0)).category("Еда"), Some(1000.0));
    assert_eq!(tracker.month(month(11)).income(), 0.0);
    assert_eq!(tracker.savings().name, "Отпуск");

    let allowance = tracker.allowance().unwrap();
    assert_eq!(allowance.status, AllowanceStatus::Active);
    assert_eq!(allowance.remaining_days, 9);
    assert_eq!(allowance.daily_budget, 1500.0 / 9.0);
}

#[test]
fn unreadable_snapshot_falls_back_to_empty_state() {
    let dir = temp_data_dir();
    fs::write(dir.join("savingsData.json"), "{broken").unwrap();
    fs::write(
        dir.join("financeData.json"),
        r#"{"2":{"income":75,"expense":0,"categories":{},"capital":0}}"#,
    )
    .unwrap();

    let clock = ManualClock::new(date(2025, 3, 1));
    let tracker = open_tracker(&dir, &clock, LedgerOptions::default());
    assert_eq!(tracker.savings(), &SavingsGoal::default());
    assert_eq!(tracker.month(month(2)).income(), 75.0);
}

#[test]
fn clearing_the_budget_persists_null() {
    let dir = temp_data_dir();
    let clock = ManualClock::new(date(2025, 6, 1));
    let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());
    tracker.configure_budget(500.0, 5).unwrap();
    assert!(tracker.clear_budget().unwrap());
    assert!(!tracker.clear_budget().unwrap());

    let storage = JsonStorage::new(dir.clone()).unwrap();
    assert_eq!(storage.read(BUDGET_KEY).unwrap().as_deref(), Some("null"));
    let reopened = open_tracker(&dir, &clock, LedgerOptions::default());
    assert!(reopened.budget().is_none());
}

#[test]
fn null_amounts_do_not_wipe_other_months() {
    let dir = temp_data_dir();
    fs::write(
        dir.join("financeData.json"),
        r#"{"0":{"income":null,"expense":0,"categories":{"rent":null},"capital":0},
            "1":{"income":"oops"},
            "3":{"income":1200,"expense":50,"categories":{"food":50},"capital":7}}"#,
    )
    .unwrap();

    let clock = ManualClock::new(date(2025, 6, 1));
    let mut tracker = open_tracker(&dir, &clock, LedgerOptions::default());
    assert_eq!(tracker.month(month(0)).income(), 0.0);
    assert_eq!(tracker.month(month(0)).category("rent"), Some(0.0));
    assert_eq!(tracker.month(month(3)).income(), 1200.0);

    tracker.add_income(month(5), 1.0).unwrap();
    let reopened = open_tracker(&dir, &clock, LedgerOptions::default());
    let april = reopened.month(month(3));
    assert_eq!(april.income(), 1200.0);
    assert_eq!(april.category("food"), Some(50.0));
    assert_eq!(april.capital(), 7.0);
    assert_eq!(reopened.month(month(5)).income(), 1.0);
}

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct FlakyStorage {
    inner: MemoryStorage,
    broken: Arc<AtomicBool>,
}

impl SnapshotStore for FlakyStorage {
    fn read(&self, key: &str) -> monthly_ledger::Result<Option<String>> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> monthly_ledger::Result<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(io::Error::other("disk full").into());
        }
        self.inner.write(key, value)
    }

    fn remove(&self, key: &str) -> monthly_ledger::Result<()> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_write_leaves_state_unchanged() {
    let storage = FlakyStorage::default();
    let broken = Arc::clone(&storage.broken);
    let clock = ManualClock::new(date(2025, 4, 10));
    let mut tracker = FinanceTracker::open(
        Box::new(storage),
        Box::new(clock),
        LedgerOptions::default(),
    )
    .expect("open tracker");
    tracker.enable_goal("Car", 1000.0).unwrap();

    broken.store(true, Ordering::SeqCst);
    assert!(matches!(tracker.add_income(month(3), 100.0), Err(LedgerError::Io(_))));
    assert!(tracker.add_expense(month(3), "food", 20.0).is_err());
    assert!(tracker.configure_budget(500.0, 5).is_err());
    assert!(tracker.deposit(50.0).is_err());
    assert_eq!(tracker.month(month(3)).income(), 0.0);
    assert!(!tracker.month(month(3)).has_category("food"));
    assert!(tracker.budget().is_none());
    assert_eq!(tracker.savings().current, 0.0);

    broken.store(false, Ordering::SeqCst);
    assert!(tracker.add_income(month(3), 100.0).unwrap());
    assert_eq!(tracker.month(month(3)).income(), 100.0);
}
