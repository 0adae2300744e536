use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ExpenseRecord;

/// Active filter selection. Unset fields (or empty driver/store strings, i.e.
/// an unselected selector) do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub driver: Option<String>,
    pub store: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && selected(&self.driver).is_none()
            && selected(&self.store).is_none()
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        self.within_dates(record.date)
            && selected(&self.driver).map_or(true, |driver| record.driver == driver)
            && selected(&self.store).map_or(true, |store| record.store == store)
    }

    fn within_dates(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Returns the records satisfying every set predicate, in input order.
pub fn apply<'a>(records: &'a [ExpenseRecord], criteria: &FilterCriteria) -> Vec<&'a ExpenseRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .collect()
}
