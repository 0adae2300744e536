use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Comandos disponíveis");
    for entry in registry.list() {
        io::print_info(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <comando>` para ver os detalhes.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Ajuda: {}", entry.name));
    io::print_info(format!("  Descrição: {}", entry.description));
    io::print_info(format!("  Uso: {}", entry.usage));
}
