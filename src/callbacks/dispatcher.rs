//! Ordered callback lists per (event, phase).

use super::error::{CallbackError, CallbackFailure};
use crate::core::{State, TransitionContext};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type alias for host callbacks.
pub type Callback<S> =
    Box<dyn Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync>;

/// When a callback runs relative to the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Before the state changes
    Before,
    /// After the state has changed
    After,
    /// Instead of before/after, when the transition does not change the state
    SelfTransition,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Before => f.write_str("before"),
            Phase::After => f.write_str("after"),
            Phase::SelfTransition => f.write_str("self"),
        }
    }
}

struct CallbackSet<S: State> {
    before: Vec<Callback<S>>,
    after: Vec<Callback<S>>,
    on_self: Vec<Callback<S>>,
}

impl<S: State> CallbackSet<S> {
    fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
            on_self: Vec::new(),
        }
    }

    fn list(&self, phase: Phase) -> &[Callback<S>] {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
            Phase::SelfTransition => &self.on_self,
        }
    }

    fn list_mut(&mut self, phase: Phase) -> &mut Vec<Callback<S>> {
        match phase {
            Phase::Before => &mut self.before,
            Phase::After => &mut self.after,
            Phase::SelfTransition => &mut self.on_self,
        }
    }
}

/// Callbacks registered per event name, in registration order.
///
/// Keyed by name and kept apart from the event table: registering a
/// callback never declares an event.
pub struct CallbackDispatcher<S: State> {
    sets: Vec<(String, CallbackSet<S>)>,
    index: HashMap<String, usize>,
}

impl<S: State> Default for CallbackDispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> CallbackDispatcher<S> {
    pub fn new() -> Self {
        Self {
            sets: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn before<F>(&mut self, event: &str, callback: F)
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.register(event, Phase::Before, Box::new(callback));
    }

    pub fn after<F>(&mut self, event: &str, callback: F)
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.register(event, Phase::After, Box::new(callback));
    }

    pub fn on_self<F>(&mut self, event: &str, callback: F)
    where
        F: Fn(&TransitionContext<'_, S>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.register(event, Phase::SelfTransition, Box::new(callback));
    }

    /// Append `callback` to the list for (event, phase). No dedup.
    pub fn register(&mut self, event: &str, phase: Phase, callback: Callback<S>) {
        let slot = match self.index.get(event) {
            Some(&slot) => slot,
            None => {
                self.sets.push((event.to_string(), CallbackSet::new()));
                self.index.insert(event.to_string(), self.sets.len() - 1);
                self.sets.len() - 1
            }
        };
        self.sets[slot].1.list_mut(phase).push(callback);
    }

    /// Number of callbacks registered for (event, phase).
    pub fn count(&self, event: &str, phase: Phase) -> usize {
        self.set(event).map_or(0, |set| set.list(phase).len())
    }

    /// Event names that have at least one callback, in first-registration order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().map(|(name, _)| name.as_str())
    }

    /// Run every callback for (event, phase) in registration order.
    ///
    /// Stops at the first failure. Returns how many callbacks ran.
    pub fn dispatch(
        &self,
        event: &str,
        phase: Phase,
        ctx: &TransitionContext<'_, S>,
    ) -> Result<usize, CallbackFailure> {
        let Some(set) = self.set(event) else {
            return Ok(0);
        };

        let callbacks = set.list(phase);
        for (index, callback) in callbacks.iter().enumerate() {
            callback(ctx).map_err(|source| CallbackFailure {
                phase,
                index,
                source,
            })?;
        }
        Ok(callbacks.len())
    }

    fn set(&self, event: &str) -> Option<&CallbackSet<S>> {
        self.index.get(event).map(|&slot| &self.sets[slot].1)
    }
}
