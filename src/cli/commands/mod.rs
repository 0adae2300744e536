use chrono::NaiveDate;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub mod filters;
pub mod messaging;
pub mod records;
pub mod system;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(records::definitions());
    commands.extend(filters::definitions());
    commands.extend(messaging::definitions());
    commands.extend(system::definitions());
    commands
}

/// Accepts both `10.5` and the pt-BR `10,5`. `inf` and `NaN` are refused.
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("{field}: `{raw}` não é um número"))
        })
}

pub(crate) fn parse_integer(field: &str, raw: &str) -> Result<i64, CommandError> {
    raw.trim().parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("{field}: `{raw}` não é um número inteiro"))
    })
}

/// Accepts ISO `2024-05-31` or `31/05/2024`.
pub(crate) fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CommandError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map_err(|_| CommandError::InvalidArguments(format!("{field}: `{raw}` não é uma data")))
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Uso: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_accept_comma_or_dot() {
        assert_eq!(parse_decimal("valor", "10,5").unwrap(), 10.5);
        assert_eq!(parse_decimal("valor", " 7.25 ").unwrap(), 7.25);
        assert!(parse_decimal("valor", "dez").is_err());
    }

    #[test]
    fn decimals_refuse_non_finite_values() {
        for raw in ["inf", "-inf", "infinity", "NaN", "1e400"] {
            assert!(
                matches!(
                    parse_decimal("valor", raw),
                    Err(CommandError::InvalidArguments(_))
                ),
                "{raw} should be refused"
            );
        }
    }

    #[test]
    fn dates_accept_iso_and_day_first() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        assert_eq!(parse_date("data", "2024-05-31").unwrap(), expected);
        assert_eq!(parse_date("data", "31/05/2024").unwrap(), expected);
        assert!(parse_date("data", "31-05").is_err());
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(parse_integer("nfs", "3").unwrap(), 3);
        assert!(parse_integer("nfs", "3.5").is_err());
    }
}
