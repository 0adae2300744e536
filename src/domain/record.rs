use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Time-based record identifier (milliseconds since the Unix epoch).
pub type RecordId = i64;

/// One delivery exit: who drove, which store, what was paid and received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub driver: String,
    pub store: String,
    pub amount: f64,
    pub received: f64,
    pub weight: f64,
    pub nfs: i64,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            driver: draft.driver,
            store: draft.store,
            amount: draft.amount,
            received: draft.received,
            weight: draft.weight,
            nfs: draft.nfs,
            date: draft.date,
        }
    }

    /// Amount received minus amount paid. Never stored.
    pub fn profit(&self) -> f64 {
        self.received - self.amount
    }
}

/// The submitted form fields, before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub driver: String,
    pub store: String,
    pub amount: f64,
    pub received: f64,
    pub weight: f64,
    pub nfs: i64,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecordDraft {
        RecordDraft {
            driver: "Carlos".into(),
            store: "Loja Centro".into(),
            amount: 120.0,
            received: 150.5,
            weight: 35.2,
            nfs: 3,
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        }
    }

    #[test]
    fn profit_is_received_minus_amount() {
        let record = ExpenseRecord::from_draft(1, draft());
        assert!((record.profit() - 30.5).abs() < 1e-9);
    }

    #[test]
    fn serializes_date_as_iso_string() {
        let record = ExpenseRecord::from_draft(1715300000000, draft());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-05-10");
        assert_eq!(json["id"], 1715300000000_i64);
        assert_eq!(json["nfs"], 3);
    }
}
