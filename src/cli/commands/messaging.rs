use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::dispatcher::Intent;

use super::usage_error;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("phone", "Definir o número do WhatsApp", "phone <número>", cmd_phone),
        CommandEntry::new("message", "Escrever a mensagem", "message <texto>", cmd_message),
        CommandEntry::new(
            "quick",
            "Usar uma mensagem rápida (sem argumento lista as opções)",
            "quick [n]",
            cmd_quick,
        ),
        CommandEntry::new("send", "Gerar o link do WhatsApp", "send", cmd_send),
    ]
}

fn cmd_phone(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error("phone <número>"));
    }
    context.apply(Intent::SetPhone(args.join(" ")))
}

fn cmd_message(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.apply(Intent::SetMessage(args.join(" ")))
}

fn cmd_quick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output_section("Mensagens rápidas");
            for (idx, template) in context.dispatcher.quick_messages().iter().enumerate() {
                io::print_info(format!("  {}. {}", idx + 1, template));
            }
            Ok(())
        }
        [raw] => {
            let index = raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .ok_or_else(|| usage_error("quick [n]"))?;
            context.apply(Intent::QuickMessage(index))
        }
        _ => Err(usage_error("quick [n]")),
    }
}

fn cmd_send(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.apply(Intent::Send)
}
