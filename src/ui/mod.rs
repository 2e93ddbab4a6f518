//! Terminal output helpers and confirmation prompts

use console::Style;
use inquire::Confirm;

use crate::error::{ChiefError, Result};

pub fn bold(text: &str) -> String {
    Style::new().bold().apply_to(text).to_string()
}

pub fn success(text: &str) -> String {
    Style::new().green().apply_to(text).to_string()
}

pub fn warn(text: &str) -> String {
    Style::new().yellow().apply_to(text).to_string()
}

pub fn failure(text: &str) -> String {
    Style::new().red().apply_to(text).to_string()
}

pub fn dim(text: &str) -> String {
    Style::new().dim().apply_to(text).to_string()
}

/// Yes/no prompt. Cancelling (Esc/Ctrl-C) counts as "no".
pub fn confirm(question: &str) -> Result<bool> {
    match Confirm::new(question)
        .with_default(false)
        .with_help_message("Press Enter to cancel, or 'y' to proceed")
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(inquire::InquireError::OperationCanceled)
        | Err(inquire::InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(ChiefError::IoError {
            message: format!("Confirmation prompt failed: {e}"),
        }),
    }
}
