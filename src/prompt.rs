use inquire::{Confirm, InquireError, MultiSelect};
use thiserror::Error;

use crate::catalog::MenuItem;

/// Why an interactive prompt did not produce an answer. Closing the prompt
/// (Esc or Ctrl-C) is its own variant so callers can branch on it without
/// inspecting error text.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt was closed")]
    Cancelled,

    #[error(transparent)]
    Inquire(InquireError),
}

impl From<InquireError> for PromptError {
    fn from(err: InquireError) -> Self {
        match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Inquire(other),
        }
    }
}

/// Source of user decisions, behind a trait so sessions can be driven
/// without a terminal in tests.
pub trait Prompter {
    /// Multi-select over the fixed menu. Returned items keep menu order
    /// regardless of the order they were toggled in.
    fn select_items(&mut self) -> Result<Vec<MenuItem>, PromptError>;

    /// Per-item yes/no gate, asked right before that item's steps run.
    fn confirm(&mut self, item: MenuItem) -> Result<bool, PromptError>;
}

pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select_items(&mut self) -> Result<Vec<MenuItem>, PromptError> {
        let selected = MultiSelect::new("Choose items:", MenuItem::ALL.to_vec()).prompt()?;
        Ok(selected)
    }

    fn confirm(&mut self, item: MenuItem) -> Result<bool, PromptError> {
        let confirmed = Confirm::new(&format!("Execute command for \"{}\"?", item.label()))
            .with_default(true)
            .prompt()?;
        Ok(confirmed)
    }
}
