use crate::domain::ExpenseRecord;

/// Display styling selected by the sign of a profit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitTone {
    Positive,
    Negative,
}

impl ProfitTone {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            ProfitTone::Positive
        } else {
            ProfitTone::Negative
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub total_paid: f64,
    pub total_received: f64,
    pub total_profit: f64,
}

impl Totals {
    pub fn tone(&self) -> ProfitTone {
        ProfitTone::of(self.total_profit)
    }
}

pub fn aggregate<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let (total_paid, total_received) = records
        .into_iter()
        .fold((0.0, 0.0), |(paid, received), record| {
            (paid + record.amount, received + record.received)
        });
    Totals {
        total_paid,
        total_received,
        total_profit: total_received - total_paid,
    }
}
