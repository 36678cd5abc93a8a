//! Configuration errors raised while declaring a state machine.

use crate::core::Marker;
use thiserror::Error;

/// Errors that can occur while configuring a state machine.
///
/// Every configuration call validates its arguments immediately, so the
/// error points at the call that introduced the problem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("State '{state}' is already declared")]
    DuplicateState { state: String },

    #[error("State '{state}' is not declared. Call .add_state() first")]
    UnknownState { state: String },

    #[error("Nesting '{state}' within '{parent}' would create a containment cycle")]
    CycleDetected { state: String, parent: String },

    #[error("State '{state}' has no parent, so it cannot be an {marker} point")]
    NotAChild { state: String, marker: Marker },

    #[error("Compound state '{parent}' already has '{existing}' as its {marker} point")]
    AlreadySet {
        parent: String,
        existing: String,
        marker: Marker,
    },

    #[error("Initial state not specified. Call .set_initial_state(state) before .build()")]
    MissingInitialState,
}
