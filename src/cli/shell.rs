use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{present, CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::dispatcher::Outcome;

/// Environment variable switching the shell to line-per-command script mode.
pub const SCRIPT_ENV: &str = "EXIT_LEDGER_CLI_SCRIPT";

/// Script lines starting with this are skipped.
const COMMENT_PREFIX: char = '#';

const FILTER_FIELDS: [&str; 6] = ["start", "end", "driver", "store", "clear", "show"];
const EXPORT_TARGETS: [&str; 2] = ["excel", "pdf"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper::new(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    present(&Outcome::Rendered(context.dispatcher.view()));

    loop {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
                // Drivers and stores change as records come and go.
                if let Some(helper) = editor.helper_mut() {
                    helper.refresh(context);
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(format!("Linha inválida: {err}"));
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

/// Completes command names, then the arguments that have a closed set of
/// values: filter fields, export targets and the drivers and stores already
/// on record.
struct LedgerHelper {
    commands: Vec<String>,
    drivers: Vec<String>,
    stores: Vec<String>,
}

impl LedgerHelper {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<String> = context
            .command_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        commands.sort();
        let mut helper = Self {
            commands,
            drivers: Vec::new(),
            stores: Vec::new(),
        };
        helper.refresh(context);
        helper
    }

    fn refresh(&mut self, context: &ShellContext) {
        self.drivers = context.dispatcher.store().drivers();
        self.stores = context.dispatcher.store().stores();
    }

    fn candidates(&self, words: &[&str]) -> Vec<String> {
        match words {
            [] => self.commands.clone(),
            ["filter"] => owned(&FILTER_FIELDS),
            ["export"] => owned(&EXPORT_TARGETS),
            ["filter", "driver"] => self.drivers.clone(),
            ["filter", "store"] => self.stores.clone(),
            _ => Vec::new(),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(idx, ch)| idx + ch.len_utf8());
        let lowered = prefix[..start].to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let needle = &prefix[start..];

        let matches = self
            .candidates(&words)
            .into_iter()
            .filter(|candidate| candidate.starts_with(needle))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: shell_words::quote(&candidate).into_owned(),
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;
}

impl Highlighter for LedgerHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for LedgerHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .expect("context");
        (context, temp)
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut context, _guard) = context();
        assert_eq!(
            handle_line(&mut context, "exit").expect("exit"),
            LoopControl::Exit
        );
        assert_eq!(
            handle_line(&mut context, "list").expect("list"),
            LoopControl::Continue
        );
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let (mut context, _guard) = context();
        handle_line(&mut context, "add \"Ana Paula\" 'Loja Sul' 10 15 1 1 2024-06-01")
            .expect("add");
        let record = &context.dispatcher.store().all()[0];
        assert_eq!(record.driver, "Ana Paula");
        assert_eq!(record.store, "Loja Sul");
    }

    #[test]
    fn quick_rejects_out_of_range_numbers_without_panicking() {
        let (mut context, _guard) = context();
        for line in ["quick -9223372036854775808", "quick 0", "quick -1", "quick 99"] {
            assert!(handle_line(&mut context, line).is_err(), "{line}");
        }
        handle_line(&mut context, "quick 2").expect("second preset");
        assert_eq!(
            context.dispatcher.composer().message,
            context.dispatcher.quick_messages()[1]
        );
    }

    #[test]
    fn non_finite_amount_is_refused_and_records_survive() {
        let (mut context, _guard) = context();
        handle_line(&mut context, "add Ana Centro 10 15 1 1 2024-06-01").expect("add");
        for line in [
            "add Bob X inf 1 1 1 2024-06-02",
            "add Bob X 1 NaN 1 1 2024-06-02",
            "add Bob X 1 1 infinity 1 2024-06-02",
        ] {
            assert!(matches!(
                handle_line(&mut context, line),
                Err(CommandError::InvalidArguments(_))
            ));
        }
        assert_eq!(context.dispatcher.store().len(), 1);
    }

    #[test]
    fn prompt_reflects_active_filter() {
        let (mut context, _guard) = context();
        handle_line(&mut context, "add Ana Centro 10 15 1 1 2024-06-01").expect("add");
        handle_line(&mut context, "add Bruno Norte 10 15 1 1 2024-06-01").expect("add");
        assert_eq!(context.prompt(), "saidas[2]> ");

        handle_line(&mut context, "filter driver Ana").expect("filter");
        assert_eq!(context.prompt(), "saidas[1/2 filtrado]> ");

        handle_line(&mut context, "filter clear").expect("clear");
        assert_eq!(context.prompt(), "saidas[2]> ");
    }

    #[test]
    fn completion_offers_fields_and_known_drivers() {
        let (mut context, _guard) = context();
        handle_line(&mut context, "add Ana Centro 10 15 1 1 2024-06-01").expect("add");
        handle_line(&mut context, "add \"Ana Paula\" Norte 10 15 1 1 2024-06-01").expect("add");
        let helper = LedgerHelper::new(&context);

        assert_eq!(helper.candidates(&["filter"]), FILTER_FIELDS.map(String::from));
        assert_eq!(helper.candidates(&["filter", "driver"]), vec!["Ana", "Ana Paula"]);
        assert_eq!(helper.candidates(&["filter", "store"]), vec!["Centro", "Norte"]);
        assert!(helper.candidates(&["send"]).is_empty());
        assert!(helper.candidates(&[]).contains(&"quick".to_string()));
    }
}
