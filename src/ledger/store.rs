use std::collections::BTreeMap;

use serde::{
    de::Deserializer,
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};
use serde_json::Value;

use super::month::{MonthIndex, MonthRecord, MONTHS_PER_YEAR};

/// The twelve month slots of the ledger, always fully populated.
///
/// Serialized as a JSON object keyed `"0"` through `"11"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerStore {
    months: [MonthRecord; MONTHS_PER_YEAR],
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(&self, month: MonthIndex) -> &MonthRecord {
        &self.months[month.get()]
    }

    pub(crate) fn month_mut(&mut self, month: MonthIndex) -> &mut MonthRecord {
        &mut self.months[month.get()]
    }

    pub fn months(&self) -> &[MonthRecord; MONTHS_PER_YEAR] {
        &self.months
    }

    pub(crate) fn months_mut(&mut self) -> impl Iterator<Item = &mut MonthRecord> {
        self.months.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthIndex, &MonthRecord)> {
        MonthIndex::all().zip(self.months.iter())
    }

    /// Normalizes every slot after a load. Returns the months whose expense
    /// had to be reconciled with their categories.
    pub fn ensure_initialized(&mut self) -> Vec<MonthIndex> {
        MonthIndex::all()
            .zip(self.months.iter_mut())
            .filter_map(|(index, record)| record.reconcile().then_some(index))
            .collect()
    }

    /// Builds the store slot by slot. A slot that cannot be read is reset to
    /// zero on its own, leaving the other months intact.
    fn from_slots(slots: BTreeMap<String, Value>) -> Self {
        let mut store = Self::default();
        for (key, raw) in slots {
            let index = key
                .parse::<usize>()
                .ok()
                .and_then(|value| MonthIndex::try_from(value).ok());
            let Some(index) = index else {
                tracing::warn!(key = %key, "ignoring unknown month slot in ledger snapshot");
                continue;
            };
            match serde_json::from_value::<Option<MonthRecord>>(raw) {
                Ok(Some(record)) => store.months[index.get()] = record,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(month = %index, error = %err, "resetting unreadable month slot");
                }
            }
        }
        for index in store.ensure_initialized() {
            tracing::warn!(month = %index, "reconciled month expense with category totals");
        }
        store
    }
}

impl Serialize for LedgerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MONTHS_PER_YEAR))?;
        for (index, record) in self.iter() {
            map.serialize_entry(&index.to_string(), record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LedgerStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slots = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_slots(slots))
    }
}
