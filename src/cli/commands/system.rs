use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::{self, section as output_section, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::dispatcher::Intent;
use crate::utils::build_info;

use super::usage_error;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("export", "Exportar (Excel ou PDF)", "export <excel|pdf>", cmd_export),
        CommandEntry::new("menu", "Abrir ou fechar o menu de navegação", "menu", cmd_menu),
        CommandEntry::new(
            "config",
            "Mostrar ou alterar a configuração",
            "config [show | plain <on|off>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Mostrar dados da compilação", "version", cmd_version),
        CommandEntry::new("help", "Listar os comandos disponíveis", "help [comando]", cmd_help),
        CommandEntry::new("exit", "Sair", "exit", cmd_exit),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["excel"] | ["xlsx"] => context.apply(Intent::ExportExcel),
        ["pdf"] => context.apply(Intent::DownloadPdf),
        _ => Err(usage_error("export <excel|pdf>")),
    }
}

fn cmd_menu(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Intent::ToggleMenu)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output_section("Configuração");
            io::print_info(format!("  Arquivo : {}", context.config_manager.path().display()));
            io::print_info(format!("  Plain   : {}", context.config.plain_output));
            io::print_info(format!(
                "  Mensagens rápidas: {}",
                context.config.quick_messages.len()
            ));
            Ok(())
        }
        ["plain", value] => {
            let plain = match *value {
                "on" => true,
                "off" => false,
                _ => return Err(usage_error("config plain <on|off>")),
            };
            context.config.plain_output = plain;
            context.config_manager.save(&context.config)?;
            output::set_preferences(OutputPreferences { plain_mode: plain });
            io::print_success("Configuração salva.");
            Ok(())
        }
        _ => Err(usage_error("config [show | plain <on|off>]")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Exit Ledger {}", meta.version));
    io::print_info(format!("  Commit     : {} ({})", meta.git_hash, meta.git_status));
    io::print_info(format!("  Compilado  : {}", meta.timestamp));
    io::print_info(format!("  Perfil     : {}", meta.profile));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
