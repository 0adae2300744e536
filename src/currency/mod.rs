//! Fixed-locale number, currency and date formatting.

use chrono::NaiveDate;

const MINOR_UNITS: usize = 2;

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub currency_symbol: String,
    /// `chrono` format string for calendar dates.
    pub date_pattern: String,
}

impl LocaleConfig {
    /// Brazilian Portuguese: comma decimals, no digit grouping, `R$`.
    pub fn pt_br() -> Self {
        Self {
            decimal_separator: ',',
            currency_symbol: "R$".into(),
            date_pattern: "%d/%m/%Y".into(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Rounds to `precision` digits and applies the locale decimal separator.
pub fn format_number(locale: &LocaleConfig, value: f64, precision: usize) -> String {
    // `+ 0.0` folds negative zero so it never renders as "-0,00".
    let body = format!("{:.*}", precision, value + 0.0);
    body.replacen('.', &locale.decimal_separator.to_string(), 1)
}

/// Amount with two fraction digits and no currency symbol (`1234,50`).
pub fn format_amount(locale: &LocaleConfig, amount: f64) -> String {
    format_number(locale, amount, MINOR_UNITS)
}

/// Amount prefixed with the locale currency symbol (`R$ 1234,50`).
pub fn format_currency_value(locale: &LocaleConfig, amount: f64) -> String {
    format!("{} {}", locale.currency_symbol, format_amount(locale, amount))
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    date.format(&locale.date_pattern).to_string()
}
