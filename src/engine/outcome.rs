//! Dispatch results and runtime errors.

use crate::callbacks::{CallbackFailure, Phase};
use crate::core::State;
use thiserror::Error;

/// Result of dispatching an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<S: State> {
    /// A rule matched and the machine moved to a different state
    Moved { from: S, to: S },

    /// A rule matched but led back to the state it started from
    Stayed(S),

    /// No rule for the state had a passing guard; nothing changed
    Rejected,
}

impl<S: State> Outcome<S> {
    /// The resolved state, or `None` when the event was rejected.
    pub fn state(&self) -> Option<&S> {
        match self {
            Outcome::Moved { to, .. } => Some(to),
            Outcome::Stayed(state) => Some(state),
            Outcome::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected)
    }

    /// `true` only for genuine state changes.
    pub fn changed_state(&self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }
}

/// Errors that can occur while dispatching an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Event '{event}' is not declared")]
    UnknownEvent { event: String },

    #[error("State '{state}' is not declared")]
    UnknownState { state: String },

    /// A callback failed. Nothing is rolled back: `state_changed` tells
    /// whether the new state was already assigned when it happened.
    #[error("Callback for event '{event}' failed (state changed: {state_changed})")]
    Callback {
        event: String,
        state_changed: bool,
        #[source]
        failure: CallbackFailure,
    },
}

impl DispatchError {
    /// Phase of the failing callback, for callback errors.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            DispatchError::Callback { failure, .. } => Some(failure.phase),
            _ => None,
        }
    }
}
