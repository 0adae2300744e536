use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::cli::ui::table_renderer::{Alignment, Column, Table};
use crate::ledger::ProfitTone;
use crate::render::{LedgerView, COLUMN_LABELS};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    pub plain_mode: bool,
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "",
        MessageKind::Success => "OK:",
        MessageKind::Warning => "AVISO:",
        MessageKind::Error => "ERRO:",
        MessageKind::Section => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", label(kind), text),
    };

    if prefs.plain_mode {
        return base;
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, &current_preferences());
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

fn tone_text(text: &str, tone: ProfitTone, prefs: &OutputPreferences) -> String {
    if prefs.plain_mode {
        return text.to_string();
    }
    match tone {
        ProfitTone::Positive => text.green().to_string(),
        ProfitTone::Negative => text.red().to_string(),
    }
}

/// Lays the ledger view out as a table followed by the totals line.
pub fn format_ledger(view: &LedgerView, prefs: &OutputPreferences) -> String {
    let mut out = String::new();
    if let Some(placeholder) = view.placeholder {
        out.push_str(placeholder);
    } else {
        let columns = COLUMN_LABELS
            .iter()
            .enumerate()
            .map(|(idx, header)| Column {
                header: (*header).to_string(),
                alignment: if (2..=6).contains(&idx) {
                    Alignment::Right
                } else {
                    Alignment::Left
                },
            })
            .chain(std::iter::once(Column {
                header: "ID".to_string(),
                alignment: Alignment::Right,
            }))
            .collect();
        let rows = view
            .rows
            .iter()
            .map(|row| {
                let mut cells = row.cells();
                if !prefs.plain_mode {
                    cells[2] = cells[2].red().to_string();
                    cells[3] = cells[3].green().to_string();
                }
                cells[6] = tone_text(&cells[6], row.profit_tone, prefs);
                cells.push(row.delete.id().to_string());
                cells
            })
            .collect();
        out.push_str(&Table { columns, rows }.render(prefs.plain_mode));
    }
    out.push('\n');
    out.push_str(&format!(
        "Total Pago: R$ {}  |  Total Recebido: R$ {}  |  Lucro: R$ {}",
        view.totals.paid,
        view.totals.received,
        tone_text(&view.totals.profit, view.totals.profit_tone, prefs)
    ));
    out
}

pub fn render_ledger(view: &LedgerView) {
    println!("{}", format_ledger(view, &current_preferences()));
}
