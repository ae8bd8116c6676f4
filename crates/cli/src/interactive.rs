//! Interactive prompts and dialogs
//!
//! Commands only prompt for values that were not given as flags, so every
//! command can also run unattended.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

/// Prompt for text input
pub fn prompt_input(prompt: &str) -> Result<String> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?;
    Ok(input)
}

/// Prompt for password input
pub fn prompt_password(prompt: &str) -> Result<String> {
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?;
    Ok(password)
}

/// Prompt for confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Prompt for selection from a list
pub fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    let items_str: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items_str)
        .default(0)
        .interact()?;
    Ok(selection)
}

/// Use `given` if present, otherwise ask.
pub fn value_or_prompt(given: Option<String>, prompt: &str) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt_input(prompt),
    }
}

/// Use `given` if present, otherwise ask without echo.
pub fn secret_or_prompt(given: Option<String>, prompt: &str) -> Result<String> {
    match given {
        Some(value) => Ok(value),
        None => prompt_password(prompt),
    }
}
