//! Frozen machine configuration shared by machine instances.

use crate::callbacks::CallbackDispatcher;
use crate::core::{State, StateId, StateRegistry};
use crate::events::{Event, EventTable};

/// Everything declared on a builder, immutable once built.
///
/// A definition is `Send + Sync` and is shared between machine instances
/// through an `Arc`; each instance keeps only its own current state.
pub struct Definition<S: State> {
    pub(crate) registry: StateRegistry<S>,
    pub(crate) events: EventTable<S>,
    pub(crate) callbacks: CallbackDispatcher<S>,
    pub(crate) initial: StateId,
    pub(crate) final_state: Option<StateId>,
    pub(crate) history_limit: Option<usize>,
}

impl<S: State> Definition<S> {
    pub fn registry(&self) -> &StateRegistry<S> {
        &self.registry
    }

    pub fn events(&self) -> &EventTable<S> {
        &self.events
    }

    pub fn callbacks(&self) -> &CallbackDispatcher<S> {
        &self.callbacks
    }

    /// The declared initial state, before entry-point redirection.
    pub fn initial_state(&self) -> &S {
        self.registry.state(self.initial)
    }

    /// The state a new machine starts in.
    pub fn resolved_initial(&self) -> StateId {
        self.registry.resolve_entry(self.initial)
    }

    pub fn final_state(&self) -> Option<&S> {
        self.final_state.map(|id| self.registry.state(id))
    }

    pub fn final_state_id(&self) -> Option<StateId> {
        self.final_state
    }

    /// How many transitions each machine keeps; `None` is unbounded.
    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    pub fn event_with_name(&self, name: &str) -> Option<&Event<S>> {
        self.events.event_with_name(name)
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.registry.states()
    }
}
