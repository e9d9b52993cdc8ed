use std::fmt;
use std::sync::RwLock;

use colored::{ColoredString, Colorize};
use finz_domain::GoalStatus;
use once_cell::sync::Lazy;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No colors, no icons; stable text for scripts and screen readers.
    pub plain: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
    if prefs.plain {
        colored::control::set_override(false);
    }
}

pub fn disable_color() {
    colored::control::set_override(false);
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[✓]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Section => ("", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let (label, icon) = build_label(kind);

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ if prefs.plain => format!("{label}: {text}"),
        _ => format!("{icon} {text}"),
    };

    if prefs.plain {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error | MessageKind::Warning => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
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

/// Aligned `label  value` rows.
pub fn two_column(entries: &[(&str, String)]) {
    let width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in entries {
        println!("  {:<width$}  {}", label, value, width = width + 1);
    }
}

/// Right-aligned numeric table. The first column is left-aligned.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }
    let render = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let width = widths.get(idx).copied().unwrap_or(0);
                if idx == 0 {
                    format!("{:<width$}", cell)
                } else {
                    format!("{:>width$}", cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };
    let header = render(headers.iter().map(|h| h.to_string()).collect());
    if preferences().plain {
        println!("  {header}");
    } else {
        println!("  {}", header.bold());
    }
    for row in rows {
        println!("  {}", render(row.clone()));
    }
}

/// Status badge, colored by health unless output is plain.
pub fn status_badge(status: GoalStatus) -> String {
    let label = status.label();
    if preferences().plain {
        return format!("[{label}]");
    }
    let styled: ColoredString = match status {
        GoalStatus::Achieved | GoalStatus::OnTrack => label.bright_green(),
        GoalStatus::ModerateRisk => label.bright_yellow(),
        GoalStatus::AtRisk | GoalStatus::Overdue => label.bright_red(),
    };
    format!("[{}]", styled.bold())
}
