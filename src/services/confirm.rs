//! Confirmation seam for destructive commands.

/// Synchronous yes/no prompt asked before a destructive operation proceeds.
///
/// Embedding UIs bridge this to whatever dialog they have; tests use canned
/// answers via the closure impl.
pub trait ConfirmationPrompt {
    /// Ask the user `message`, returning true on an affirmative answer.
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
