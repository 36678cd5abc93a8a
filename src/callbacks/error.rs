//! Callback failure types.

use super::dispatcher::Phase;
use thiserror::Error;

/// Error returned by a host callback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrap any error, keeping its display text.
    pub fn from_error<E: std::error::Error>(error: E) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CallbackError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A callback failed part-way through a phase.
///
/// Callbacks after `index` in the same phase did not run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{phase} callback #{index} failed: {source}")]
pub struct CallbackFailure {
    pub phase: Phase,
    pub index: usize,
    #[source]
    pub source: CallbackError,
}
