use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("failed to read choice: {0}")]
    Io(#[from] std::io::Error),
}

/// One entry offered to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub value: usize,
}

/// Domain interface for the host's single-choice prompt.
///
/// Blocks until the user picks an entry or cancels. Returns the chosen
/// entry's `value`, or `None` on cancel.
pub trait ChoicePrompt: Send {
    fn present_choices(&mut self, choices: &[Choice]) -> Result<Option<usize>, PromptError>;
}
