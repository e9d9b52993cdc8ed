use std::io;

use crossterm::tty::IsTty;
use dialoguer::{theme::ColorfulTheme, Input};
use finz_domain::YearMonth;

use crate::errors::CliError;

/// True when both stdin and stdout are attached to a terminal.
pub fn interactive() -> bool {
    io::stdin().is_tty() && io::stdout().is_tty()
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    CliError::Command(format!("prompt failed: {err}"))
}

pub fn goal_name(theme: &ColorfulTheme) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt("Goal name")
        .interact_text()
        .map_err(prompt_error)
}

/// Accepts grouped input such as `1,50,000`.
pub fn target_amount(theme: &ColorfulTheme) -> Result<f64, CliError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt("Target amount")
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .replace(',', "")
                .trim()
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| "enter a number".to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;
    raw.replace(',', "")
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::Input(format!("`{raw}` is not a valid amount")))
}

pub fn target_month(theme: &ColorfulTheme) -> Result<YearMonth, CliError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt("Target month (YYYY-MM)")
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .parse::<YearMonth>()
                .map(|_| ())
                .map_err(|err| err.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;
    raw.parse::<YearMonth>()
        .map_err(|err| CliError::Input(err.to_string()))
}
