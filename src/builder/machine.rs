//! Builder for configuring state machines.

use crate::audit::AuditFinding;
use crate::builder::error::ConfigError;
use crate::callbacks::{CallbackDispatcher, CallbackError};
use crate::core::{Guard, State, StateId, StateRegistry, TransitionContext};
use crate::engine::{Definition, StateMachine};
use crate::events::EventTable;
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::warn;

/// Builder for configuring a state machine with a fluent API.
///
/// Every declaring call validates its arguments immediately and returns
/// `Result<Self, ConfigError>`, so a configuration reads as a chain of `?`.
/// Callback registration cannot fail and returns `Self`.
pub struct StateMachineBuilder<S: State> {
    registry: StateRegistry<S>,
    events: EventTable<S>,
    callbacks: CallbackDispatcher<S>,
    initial: Option<StateId>,
    final_state: Option<StateId>,
    history_limit: Option<usize>,
}

impl<S: State> StateMachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            registry: StateRegistry::new(),
            events: EventTable::new(),
            callbacks: CallbackDispatcher::new(),
            initial: None,
            final_state: None,
            history_limit: None,
        }
    }

    /// Declare a top-level state.
    pub fn add_state(mut self, state: S) -> Result<Self, ConfigError> {
        self.registry.add_state(state)?;
        Ok(self)
    }

    /// Declare several top-level states at once.
    pub fn add_states(mut self, states: impl IntoIterator<Item = S>) -> Result<Self, ConfigError> {
        for state in states {
            self.registry.add_state(state)?;
        }
        Ok(self)
    }

    /// Declare `state` nested within `parent`.
    pub fn add_compound_state(mut self, state: S, parent: S) -> Result<Self, ConfigError> {
        self.registry.add_compound_state(state, &parent)?;
        Ok(self)
    }

    /// Set the initial state (required).
    pub fn set_initial_state(mut self, state: S) -> Result<Self, ConfigError> {
        self.initial = Some(self.registry.require(&state)?);
        Ok(self)
    }

    /// Set the final state. Terminal by convention only.
    pub fn set_final_state(mut self, state: S) -> Result<Self, ConfigError> {
        self.final_state = Some(self.registry.require(&state)?);
        Ok(self)
    }

    /// Make `state` the entry point of its parent.
    pub fn set_entry_point(mut self, state: S) -> Result<Self, ConfigError> {
        self.registry.set_entry_point(&state)?;
        Ok(self)
    }

    /// Make `state` the exit point of its parent.
    pub fn set_exit_point(mut self, state: S) -> Result<Self, ConfigError> {
        self.registry.set_exit_point(&state)?;
        Ok(self)
    }

    /// Register a guarded rule for `event`.
    ///
    /// Rules for the same event are tried in registration order.
    pub fn when(
        mut self,
        event: &str,
        guard: impl Into<Guard<S>>,
        from: S,
        to: S,
    ) -> Result<Self, ConfigError> {
        self.events
            .add_transition(&self.registry, event, guard.into(), &from, &to)?;
        Ok(self)
    }

    /// Register an unguarded rule for `event`.
    pub fn on(self, event: &str, from: S, to: S) -> Result<Self, ConfigError> {
        self.when(event, Guard::always(), from, to)
    }

    /// Run `callback` before the state changes on `event`.
    pub fn before<F>(mut self, event: &str, callback: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.before(event, callback);
        self
    }

    /// Run `callback` after the state changed on `event`.
    pub fn after<F>(mut self, event: &str, callback: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.after(event, callback);
        self
    }

    /// Run `callback` when `event` leads back to the state it started from.
    pub fn on_self<F>(mut self, event: &str, callback: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.on_self(event, callback);
        self
    }

    /// Keep at most `limit` transitions in each machine's history.
    ///
    /// Older entries are dropped first. Unbounded when never called.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Freeze the configuration into a shareable definition.
    ///
    /// Audit findings are logged as warnings; they never fail the build.
    pub fn build_definition(self) -> Result<Arc<Definition<S>>, ConfigError> {
        let initial = self.initial.ok_or(ConfigError::MissingInitialState)?;

        let definition = Definition {
            registry: self.registry,
            events: self.events,
            callbacks: self.callbacks,
            initial,
            final_state: self.final_state,
            history_limit: self.history_limit,
        };

        if let Validation::Failure(findings) = definition.audit() {
            for finding in findings.iter() {
                log_finding(finding);
            }
        }

        Ok(Arc::new(definition))
    }

    /// Build a machine in the initial state.
    pub fn build(self) -> Result<StateMachine<S>, ConfigError> {
        Ok(StateMachine::new(self.build_definition()?))
    }
}

fn log_finding(finding: &AuditFinding) {
    warn!(finding = %finding, "state machine configuration audit");
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
