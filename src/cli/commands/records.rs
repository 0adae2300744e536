use crate::cli::core::{present, CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::dispatcher::{Intent, Outcome};
use crate::domain::RecordDraft;

use super::{parse_date, parse_decimal, parse_integer, usage_error};

const ADD_USAGE: &str = "add <motorista> <loja> <valor_pago> <valor_recebido> <peso> <nfs> [data]";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Registrar uma nova saída", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Excluir uma saída pelo ID", DELETE_USAGE, cmd_delete),
        CommandEntry::new("list", "Listar saídas com os filtros atuais", "list", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match args {
        [] if context.mode == CliMode::Interactive => prompt_draft(context)?,
        [driver, store, amount, received, weight, nfs, rest @ ..] if rest.len() <= 1 => {
            RecordDraft {
                driver: (*driver).to_string(),
                store: (*store).to_string(),
                amount: parse_decimal("amount", amount)?,
                received: parse_decimal("received", received)?,
                weight: parse_decimal("weight", weight)?,
                nfs: parse_integer("nfs", nfs)?,
                date: match rest.first() {
                    Some(raw) => parse_date("date", raw)?,
                    None => context.dispatcher.form().date,
                },
            }
        }
        _ => return Err(usage_error(ADD_USAGE)),
    };
    context.apply(Intent::Submit(draft))?;
    io::print_success("Saída registrada.");
    Ok(())
}

/// Interactive entry form; the date field starts at the form default.
fn prompt_draft(context: &ShellContext) -> Result<RecordDraft, CommandError> {
    let theme = &context.theme;
    let driver: String = io::prompt_value(theme, "Motorista", None)?;
    let store: String = io::prompt_value(theme, "Loja", None)?;
    let amount: String = io::prompt_value(theme, "Valor Pago (R$)", None)?;
    let received: String = io::prompt_value(theme, "Valor Recebido (R$)", None)?;
    let weight: String = io::prompt_value(theme, "Peso (kg)", None)?;
    let nfs: String = io::prompt_value(theme, "Qtd NFs", None)?;
    let date: String = io::prompt_value(
        theme,
        "Data",
        Some(context.dispatcher.form().date.format("%Y-%m-%d").to_string()),
    )?;

    Ok(RecordDraft {
        driver,
        store,
        amount: parse_decimal("amount", &amount)?,
        received: parse_decimal("received", &received)?,
        weight: parse_decimal("weight", &weight)?,
        nfs: parse_integer("nfs", &nfs)?,
        date: parse_date("date", &date)?,
    })
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let id = parse_integer("id", raw)?;
    context.apply(Intent::Delete(id))
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    present(&Outcome::Rendered(context.dispatcher.view()));
    Ok(())
}
