use std::fmt;
use std::str::FromStr;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompts until the answer parses as `T`; `initial` pre-fills the field.
pub fn prompt_value<T>(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<String>,
) -> Result<T, CommandError>
where
    T: Clone + FromStr + ToString,
    T::Err: fmt::Debug + fmt::Display,
{
    let mut input = Input::<T>::with_theme(theme).with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input.interact_text().map_err(CommandError::from)
}
