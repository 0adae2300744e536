//! Shell context construction, command dispatch and outcome presentation.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    dispatcher::{Dispatcher, Intent, Outcome},
    errors::LedgerError,
    ledger::{apply, RecordStore},
    storage::FileStore,
    utils::paths,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command; the shell reports it and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("saída solicitada")]
    ExitRequested,
}

/// Failure that stops the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(err) => CliError::Core(err),
            CommandError::Io(err) => CliError::Io(err),
            CommandError::Dialoguer(err) => CliError::Dialoguer(err),
            other => CliError::Core(LedgerError::InvalidInput(other.to_string())),
        }
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, paths::app_data_dir())
    }

    /// Builds a context whose config and records live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let backend = FileStore::in_base(&base)?;
        let store = RecordStore::load(Box::new(backend));
        let dispatcher = Dispatcher::new(store, &config);

        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output || mode == CliMode::Script,
        });

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            dispatcher,
        })
    }

    /// `saidas[5]> `, or `saidas[2/5 filtrado]> ` while a filter is active.
    pub fn prompt(&self) -> String {
        let store = self.dispatcher.store();
        let criteria = self.dispatcher.criteria();
        if criteria.is_empty() {
            format!("saidas[{}]> ", store.len())
        } else {
            let shown = apply(store.all(), criteria).len();
            format!("saidas[{shown}/{} filtrado]> ", store.len())
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Runs an intent through the dispatcher and prints what it produced.
    pub(crate) fn apply(&mut self, intent: Intent) -> CommandResult {
        let outcome = self.dispatcher.dispatch(intent)?;
        present(&outcome);
        Ok(())
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Comando desconhecido `{input}`. Digite `help` para ver os comandos disponíveis."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Você quis dizer `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Sair?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <comando>` para ver o uso.");
            }
            other => cli_io::print_error(other),
        }
    }
}

pub(crate) fn present(outcome: &Outcome) {
    match outcome {
        Outcome::Rendered(view) => output::render_ledger(view),
        Outcome::FiltersToggled { visible, label } => {
            let state = if *visible { "visíveis" } else { "ocultos" };
            cli_io::print_info(format!("Filtros {state}. [{label}]"));
        }
        Outcome::MenuToggled { open } => {
            let state = if *open { "aberto" } else { "fechado" };
            cli_io::print_info(format!("Menu {state}."));
        }
        Outcome::ComposerUpdated(composer) => {
            cli_io::print_info(format!("Número: {}", composer.phone));
            cli_io::print_info(format!("Mensagem: {}", composer.message));
        }
        Outcome::OpenLink(url) => {
            cli_io::print_success("Abra o link para enviar a mensagem:");
            cli_io::print_info(url);
        }
        Outcome::Notice(message) => cli_io::print_warning(message),
    }
}
