//! Event table: per-event ordered rule lists.

use super::rule::TransitionRule;
use crate::builder::ConfigError;
use crate::core::{Guard, State, StateId, StateRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Stable identifier of a declared event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct EventId(pub(crate) usize);

impl EventId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named trigger and its rules, in registration order.
pub struct Event<S: State> {
    id: EventId,
    name: String,
    rules: Vec<TransitionRule<S>>,
}

impl<S: State> Event<S> {
    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[TransitionRule<S>] {
        &self.rules
    }

    /// The first rule, in registration order, that applies to `from` now.
    ///
    /// Later rules for the same source state are never consulted once an
    /// earlier one is eligible.
    pub fn first_match(
        &self,
        from: StateId,
        registry: &StateRegistry<S>,
    ) -> Option<&TransitionRule<S>> {
        self.rules.iter().enumerate().find_map(|(position, rule)| {
            let eligible = rule.can_execute(from, &self.name, registry);
            if rule.from == from {
                trace!(event = %self.name, position, eligible, "evaluated rule");
            }
            eligible.then_some(rule)
        })
    }

    /// `true` when at least one rule leaves `from`, regardless of guards.
    pub fn has_rules_from(&self, from: StateId) -> bool {
        self.rules.iter().any(|rule| rule.from == from)
    }
}

impl<S: State> std::fmt::Debug for Event<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rules", &self.rules)
            .finish()
    }
}

/// All declared events, keyed by name.
pub struct EventTable<S: State> {
    events: Vec<Event<S>>,
    index: HashMap<String, EventId>,
}

impl<S: State> Default for EventTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> EventTable<S> {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append a rule to `event`, declaring the event on first use.
    ///
    /// Both ends must already be declared in `registry`.
    pub fn add_transition(
        &mut self,
        registry: &StateRegistry<S>,
        event: &str,
        guard: Guard<S>,
        from: &S,
        to: &S,
    ) -> Result<EventId, ConfigError> {
        let from = registry.require(from)?;
        let to = registry.require(to)?;

        let id = self.intern(event);
        self.events[id.0].rules.push(TransitionRule { from, to, guard });
        Ok(id)
    }

    fn intern(&mut self, event: &str) -> EventId {
        if let Some(id) = self.index.get(event) {
            return *id;
        }
        let id = EventId(self.events.len());
        self.events.push(Event {
            id,
            name: event.to_string(),
            rules: Vec::new(),
        });
        self.index.insert(event.to_string(), id);
        id
    }

    /// The event called `name`, or `None` when it was never declared.
    pub fn event_with_name(&self, name: &str) -> Option<&Event<S>> {
        self.index.get(name).map(|id| &self.events[id.0])
    }

    pub fn event(&self, id: EventId) -> &Event<S> {
        &self.events[id.0]
    }

    /// All events, in declaration order.
    pub fn events(&self) -> &[Event<S>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
