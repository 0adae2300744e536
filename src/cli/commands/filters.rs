use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::dispatcher::Intent;
use crate::ledger::FilterCriteria;

use super::{parse_date, usage_error};

const FILTER_USAGE: &str =
    "filter <start|end|driver|store> <valor> | filter clear [campo] | filter show";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "filter",
            "Alterar filtros de data, motorista e loja",
            FILTER_USAGE,
            cmd_filter,
        ),
        CommandEntry::new(
            "filters",
            "Exibir ou ocultar o painel de filtros",
            "filters",
            cmd_toggle_filters,
        ),
    ]
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut criteria = context.dispatcher.criteria().clone();
    match args {
        ["show"] | [] => {
            show_filters(context);
            return Ok(());
        }
        ["clear"] => criteria = FilterCriteria::default(),
        ["clear", field] => clear_field(&mut criteria, field)?,
        [field, value @ ..] if !value.is_empty() => {
            set_field(&mut criteria, field, &value.join(" "))?
        }
        _ => return Err(usage_error(FILTER_USAGE)),
    }
    context.apply(Intent::FilterChanged(criteria))
}

fn set_field(criteria: &mut FilterCriteria, field: &str, value: &str) -> CommandResult {
    match field {
        "start" => criteria.start_date = Some(parse_date("start", value)?),
        "end" => criteria.end_date = Some(parse_date("end", value)?),
        "driver" => criteria.driver = Some(value.to_string()),
        "store" => criteria.store = Some(value.to_string()),
        _ => return Err(usage_error(FILTER_USAGE)),
    }
    Ok(())
}

fn clear_field(criteria: &mut FilterCriteria, field: &str) -> CommandResult {
    match field {
        "start" => criteria.start_date = None,
        "end" => criteria.end_date = None,
        "driver" => criteria.driver = None,
        "store" => criteria.store = None,
        _ => return Err(usage_error(FILTER_USAGE)),
    }
    Ok(())
}

fn show_filters(context: &ShellContext) {
    let criteria = context.dispatcher.criteria();
    let store = context.dispatcher.store();
    let or_all = |value: Option<String>| value.unwrap_or_else(|| "(todos)".to_string());

    output_section("Filtros");
    io::print_info(format!(
        "  Data inicial : {}",
        or_all(criteria.start_date.map(|d| d.format("%d/%m/%Y").to_string()))
    ));
    io::print_info(format!(
        "  Data final   : {}",
        or_all(criteria.end_date.map(|d| d.format("%d/%m/%Y").to_string()))
    ));
    io::print_info(format!("  Motorista    : {}", or_all(criteria.driver.clone())));
    io::print_info(format!("  Loja         : {}", or_all(criteria.store.clone())));
    io::print_info(format!("  Motoristas   : {}", store.drivers().join(", ")));
    io::print_info(format!("  Lojas        : {}", store.stores().join(", ")));
}

fn cmd_toggle_filters(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Intent::ToggleFilters)
}
