//! Findings reported by the configuration audit.

use thiserror::Error;

/// A questionable but legal configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditFinding {
    #[error("Final state '{state}' has an outgoing rule on event '{event}'")]
    FinalStateHasRules { state: String, event: String },

    #[error("Event '{event}' targets compound state '{state}', which has no entry point")]
    CompoundWithoutEntry { state: String, event: String },

    #[error("Rule #{position} of event '{event}' from '{from}' is shadowed by an unconditional earlier rule")]
    UnreachableRule {
        event: String,
        from: String,
        position: usize,
    },

    #[error("Compound state '{state}' has an exit point but no entry point")]
    ExitPointWithoutEntry { state: String },

    #[error("Callbacks are registered for '{event}', which has no transition rules")]
    CallbacksWithoutEvent { event: String },
}
