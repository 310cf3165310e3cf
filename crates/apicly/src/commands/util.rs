//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use dialoguer::Input;

use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Ask for one line of text. An empty answer is allowed and returned as-is.
pub fn prompt_line(prompt: &str) -> Result<String, CliError> {
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    Ok(answer.trim().to_owned())
}

/// Ask for a value with a default.
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .map_err(prompt_err)
}

/// One trimmed answer: a dialoguer prompt on a terminal, a line of stdin
/// otherwise. `None` once stdin is exhausted.
pub fn read_answer(prompt: &str) -> Result<Option<String>, CliError> {
    if io::stdin().is_terminal() {
        return prompt_line(prompt).map(Some);
    }
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Like [`prompt_with_default`], but also works with piped stdin. An empty
/// or missing line takes the default.
pub fn answer_with_default(prompt: &str, default: &str) -> Result<String, CliError> {
    if io::stdin().is_terminal() {
        return prompt_with_default(prompt, default);
    }
    Ok(read_answer(prompt)?
        .filter(|answer| !answer.is_empty())
        .unwrap_or_else(|| default.to_owned()))
}
