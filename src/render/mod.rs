//! Projects the filtered records and their totals into display rows.
//!
//! The view is rebuilt from the record list on every call; nothing is cached
//! between renders.

use tracing::debug;

use crate::currency::{format_amount, format_currency_value, format_date, LocaleConfig};
use crate::dispatcher::Intent;
use crate::domain::{ExpenseRecord, RecordId};
use crate::ledger::{aggregate, apply, FilterCriteria, ProfitTone};

/// Shown instead of rows when the filtered subset is empty.
pub const EMPTY_PLACEHOLDER: &str = "Nenhuma saída encontrada.";

/// Column labels in display order.
pub const COLUMN_LABELS: [&str; 8] = [
    "Motorista",
    "Loja",
    "Valor Pago",
    "Valor Recebido",
    "Peso (kg)",
    "Qtd NFs",
    "Lucro",
    "Data",
];

/// Delete affordance bound to one row's record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteHandle {
    id: RecordId,
}

impl DeleteHandle {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn intent(&self) -> Intent {
        Intent::Delete(self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RecordId,
    pub driver: String,
    pub store: String,
    pub paid: String,
    pub received: String,
    pub weight: String,
    pub nfs: String,
    pub profit: String,
    pub profit_tone: ProfitTone,
    pub date: String,
    pub delete: DeleteHandle,
}

impl RowView {
    fn project(record: &ExpenseRecord, locale: &LocaleConfig) -> Self {
        let profit = record.profit();
        Self {
            id: record.id,
            driver: record.driver.clone(),
            store: record.store.clone(),
            paid: format_currency_value(locale, record.amount),
            received: format_currency_value(locale, record.received),
            weight: record.weight.to_string(),
            nfs: record.nfs.to_string(),
            profit: format_currency_value(locale, profit),
            profit_tone: ProfitTone::of(profit),
            date: format_date(locale, record.date),
            delete: DeleteHandle { id: record.id },
        }
    }

    /// Cell texts in `COLUMN_LABELS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.driver.clone(),
            self.store.clone(),
            self.paid.clone(),
            self.received.clone(),
            self.weight.clone(),
            self.nfs.clone(),
            self.profit.clone(),
            self.date.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsView {
    pub paid: String,
    pub received: String,
    pub profit: String,
    pub profit_tone: ProfitTone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub rows: Vec<RowView>,
    pub placeholder: Option<&'static str>,
    pub totals: TotalsView,
}

impl LedgerView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render(
    records: &[ExpenseRecord],
    criteria: &FilterCriteria,
    locale: &LocaleConfig,
) -> LedgerView {
    let subset = apply(records, criteria);
    let totals = aggregate(subset.iter().copied());
    let rows: Vec<RowView> = subset
        .iter()
        .map(|record| RowView::project(record, locale))
        .collect();
    debug!(shown = rows.len(), total = records.len(), "ledger rendered");

    LedgerView {
        placeholder: rows.is_empty().then_some(EMPTY_PLACEHOLDER),
        rows,
        totals: TotalsView {
            paid: format_amount(locale, totals.total_paid),
            received: format_amount(locale, totals.total_received),
            profit: format_amount(locale, totals.total_profit),
            profit_tone: totals.tone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, driver: &str, amount: f64, received: f64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            driver: driver.into(),
            store: "Centro".into(),
            amount,
            received,
            weight: 12.5,
            nfs: 4,
            date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
        }
    }

    #[test]
    fn rows_carry_formatted_fields() {
        let records = vec![record(7, "Ana", 10.0, 8.5)];
        let view = render(&records, &FilterCriteria::default(), &LocaleConfig::pt_br());
        let row = &view.rows[0];
        assert_eq!(row.paid, "R$ 10,00");
        assert_eq!(row.received, "R$ 8,50");
        assert_eq!(row.profit, "R$ -1,50");
        assert_eq!(row.profit_tone, ProfitTone::Negative);
        assert_eq!(row.weight, "12.5");
        assert_eq!(row.nfs, "4");
        assert_eq!(row.date, "02/11/2024");
        assert_eq!(row.delete.intent(), Intent::Delete(7));
        assert!(view.placeholder.is_none());
    }

    #[test]
    fn totals_follow_filtered_subset() {
        let records = vec![
            record(3, "Ana", 10.0, 15.0),
            record(2, "Bruno", 100.0, 1.0),
            record(1, "Ana", 20.0, 18.0),
        ];
        let criteria = FilterCriteria {
            driver: Some("Ana".into()),
            ..FilterCriteria::default()
        };
        let view = render(&records, &criteria, &LocaleConfig::pt_br());
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.totals.paid, "30,00");
        assert_eq!(view.totals.received, "33,00");
        assert_eq!(view.totals.profit, "3,00");
        assert_eq!(view.totals.profit_tone, ProfitTone::Positive);
    }

    #[test]
    fn empty_subset_renders_placeholder_and_zero_totals() {
        let view = render(&[], &FilterCriteria::default(), &LocaleConfig::pt_br());
        assert!(view.is_empty());
        assert_eq!(view.placeholder, Some(EMPTY_PLACEHOLDER));
        assert_eq!(view.totals.paid, "0,00");
        assert_eq!(view.totals.profit, "0,00");
        assert_eq!(view.totals.profit_tone, ProfitTone::Positive);
    }
}
