
use crate::ledger::MonthIndex;

fn month(index: u8) -> MonthIndex {
    MonthIndex::new(index).expect("valid month index")
}
