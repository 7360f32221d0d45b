//! Error types for command validation.

use thiserror::Error;

/// Command text that matches none of the accepted patterns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{command:?} doesn't match the accepted patterns; see the command reference for the list of commands")]
pub struct GrammarError {
    /// The rejected text, as submitted.
    pub command: String,
}

impl GrammarError {
    /// Create an error for the given text.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}
