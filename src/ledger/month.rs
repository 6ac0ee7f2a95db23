use std::{collections::BTreeMap, fmt};

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::LedgerError;

pub const MONTHS_PER_YEAR: usize = 12;

/// Zero-based calendar month (0 = January, 11 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthIndex(u8);

impl MonthIndex {
    pub fn new(index: u8) -> Option<Self> {
        (usize::from(index) < MONTHS_PER_YEAR).then_some(Self(index))
    }

    /// Month slot that a calendar date falls into.
    pub fn of(date: &impl Datelike) -> Self {
        // month0() is always in 0..12
        Self(date.month0() as u8)
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = MonthIndex> {
        (0..MONTHS_PER_YEAR as u8).map(MonthIndex)
    }
}

impl TryFrom<usize> for MonthIndex {
    type Error = LedgerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(MonthIndex::new)
            .ok_or(LedgerError::InvalidMonth(value))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Financial state for one calendar month.
///
/// `expense` always equals the sum of the category amounts. The fields are
/// private so every change to a category goes through a method that keeps the
/// two in step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthRecord {
    #[serde(deserialize_with = "lenient_amount")]
    income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    expense: f64,
    #[serde(deserialize_with = "lenient_amounts")]
    categories: BTreeMap<String, f64>,
    #[serde(deserialize_with = "lenient_amount")]
    capital: f64,
}

impl MonthRecord {
    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn expense(&self) -> f64 {
        self.expense
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }

    pub fn categories(&self) -> &BTreeMap<String, f64> {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<f64> {
        self.categories.get(name).copied()
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Sum of every category amount.
    pub fn category_total(&self) -> f64 {
        self.categories.values().sum()
    }

    pub(crate) fn add_income(&mut self, amount: f64) {
        self.income += amount;
    }

    pub(crate) fn set_capital(&mut self, value: f64) {
        self.capital = value;
    }

    /// Inserts an empty category. Returns `false` when the name already exists.
    pub(crate) fn insert_category(&mut self, name: &str) -> bool {
        if self.categories.contains_key(name) {
            return false;
        }
        self.categories.insert(name.to_string(), 0.0);
        true
    }

    /// Adds `amount` to a category, creating it at zero first when `create` is set.
    ///
    /// Negative amounts act as corrections and are refused when they would
    /// take the category below zero.
    pub(crate) fn add_to_category(&mut self, name: &str, amount: f64, create: bool) -> bool {
        let current = match self.categories.get(name) {
            Some(value) => *value,
            None if create => 0.0,
            None => return false,
        };
        let next = current + amount;
        if next < 0.0 {
            return false;
        }
        self.categories.insert(name.to_string(), next);
        self.sync_expense();
        true
    }

    /// Removes a category together with its share of the month's expense.
    pub(crate) fn remove_category(&mut self, name: &str) -> Option<f64> {
        let removed = self.categories.remove(name)?;
        self.sync_expense();
        Some(removed)
    }

    /// Restores `expense == sum(categories)` for records read from older
    /// snapshots. Returns `true` when the stored expense was off.
    pub(crate) fn reconcile(&mut self) -> bool {
        let total = self.category_total();
        let tolerance = 1e-9 * total.abs().max(1.0);
        let drifted = !self.expense.is_finite() || (self.expense - total).abs() > tolerance;
        self.expense = total;
        drifted
    }

    fn sync_expense(&mut self) {
        self.expense = self.category_total();
    }
}

/// Reads a stored amount, mapping `null` (how a browser serializes a
/// non-finite number) to zero.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|amount| amount.is_finite()).unwrap_or(0.0))
}

fn lenient_amounts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, f64>, D::Error> {
    let raw = Option::<BTreeMap<String, Option<f64>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, amount)| {
            let amount = amount.filter(|value| value.is_finite()).unwrap_or(0.0);
            (name, amount)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn month_index_rejects_out_of_range() {
        assert!(MonthIndex::new(11).is_some());
        assert!(MonthIndex::new(12).is_none());
        assert!(matches!(
            MonthIndex::try_from(12usize),
            Err(LedgerError::InvalidMonth(12))
        ));
    }

    #[test]
    fn month_index_of_date_is_zero_based() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(MonthIndex::of(&date).get(), 0);
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(MonthIndex::of(&date).get(), 11);
    }

    #[test]
    fn removing_category_subtracts_its_amount() {
        let mut record = MonthRecord::default();
        record.add_to_category("food", 100.0, true);
        record.add_to_category("rent", 500.0, true);
        assert_eq!(record.expense(), 600.0);

        assert_eq!(record.remove_category("food"), Some(100.0));
        assert_eq!(record.expense(), 500.0);
        assert!(record.remove_category("food").is_none());
    }

    #[test]
    fn add_without_create_requires_existing_category() {
        let mut record = MonthRecord::default();
        assert!(!record.add_to_category("travel", 40.0, false));
        assert_eq!(record.expense(), 0.0);
        assert!(record.categories().is_empty());
    }

    #[test]
    fn reconcile_repairs_drifted_expense() {
        let mut record: MonthRecord =
            serde_json::from_str(r#"{"income":10,"expense":999,"categories":{"a":5}}"#).unwrap();
        assert!(record.reconcile());
        assert_eq!(record.expense(), 5.0);
        assert!(!record.reconcile());
    }

    #[test]
    fn corrections_cannot_go_below_zero() {
        let mut record = MonthRecord::default();
        assert!(!record.add_to_category("food", -250.0, true));
        assert!(!record.has_category("food"));

        assert!(record.add_to_category("food", 100.0, true));
        assert!(record.add_to_category("food", -40.0, true));
        assert!(!record.add_to_category("food", -61.0, true));
        assert_eq!(record.category("food"), Some(60.0));
        assert_eq!(record.expense(), 60.0);
    }

    #[test]
    fn null_amounts_load_as_zero() {
        let record: MonthRecord = serde_json::from_str(
            r#"{"income":null,"expense":null,"categories":{"a":null,"b":5},"capital":null}"#,
        )
        .unwrap();
        assert_eq!(record.income(), 0.0);
        assert_eq!(record.capital(), 0.0);
        assert_eq!(record.category("a"), Some(0.0));
        assert_eq!(record.category("b"), Some(5.0));

        let record: MonthRecord = serde_json::from_str(r#"{"categories":null}"#).unwrap();
        assert!(record.categories().is_empty());
    }
}
