use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};

/// Clock abstracts access to the current date so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock. Calendar dates follow the local time zone, the way the
/// user's own calendar does.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<RwLock<NaiveDate>>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(RwLock::new(date)),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        let mut guard = self.date.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = date;
    }

    pub fn advance_days(&self, days: i64) {
        let next = self.today() + Duration::days(days);
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.today().and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        *self.date.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
