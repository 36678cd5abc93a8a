//! State machine instance and the transition-resolution algorithm.

use crate::callbacks::{CallbackFailure, Phase};
use crate::core::{State, StateHistory, StateId, StateTransition, TransitionContext};
use crate::engine::definition::Definition;
use crate::engine::outcome::{DispatchError, Outcome};
use crate::events::Event;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// A running machine: a shared definition plus one current state.
///
/// Dispatch takes `&mut self`, so a callback cannot borrow the instance
/// that is running it. Callbacks are `'static`, though: one that captures
/// the host's `Arc<Mutex<StateMachine<_>>>` and calls `lock()` on it blocks
/// forever, because the dispatching thread already holds that lock.
/// Callbacks that need to trigger further events should queue them for the
/// host to fire after dispatch returns.
pub struct StateMachine<S: State> {
    id: Uuid,
    definition: Arc<Definition<S>>,
    current: StateId,
    history: StateHistory<S>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine in the definition's initial state.
    ///
    /// A compound initial state is resolved through its entry points.
    pub fn new(definition: Arc<Definition<S>>) -> Self {
        let current = definition.resolved_initial();
        let history = StateHistory::with_limit(definition.history_limit);
        Self {
            id: Uuid::new_v4(),
            definition,
            current,
            history,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &Arc<Definition<S>> {
        &self.definition
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        self.definition.registry.state(self.current)
    }

    pub fn current_id(&self) -> StateId {
        self.current
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// `true` when the machine sits in the designated final state.
    pub fn is_final(&self) -> bool {
        self.definition.final_state == Some(self.current)
    }

    /// `true` when the current state is `state` or nested beneath it.
    pub fn is_in(&self, state: &S) -> bool {
        self.definition
            .registry
            .id_of(state)
            .is_some_and(|id| self.definition.registry.is_descendant_of(self.current, id))
    }

    pub fn event_with_name(&self, name: &str) -> Option<&Event<S>> {
        self.definition.events.event_with_name(name)
    }

    /// Whether `event` would be accepted from the current state right now.
    ///
    /// Guards are evaluated; callbacks are not run and nothing changes.
    pub fn can_fire(&self, event: &str) -> bool {
        self.event_with_name(event).is_some_and(|e| {
            e.first_match(self.current, &self.definition.registry)
                .is_some()
        })
    }

    /// Names of the events `can_fire` accepts, in declaration order.
    pub fn available_events(&self) -> Vec<&str> {
        self.definition
            .events
            .events()
            .iter()
            .filter(|e| e.first_match(self.current, &self.definition.registry).is_some())
            .map(|e| e.name())
            .collect()
    }

    /// Return to the initial state and forget the history.
    pub fn reset(&mut self) {
        self.current = self.definition.resolved_initial();
        self.history.clear();
        debug!(machine = %self.id, state = self.current_state().name(), "machine reset");
    }

    /// Forget the recorded transitions, staying in the current state.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Dispatch `event` from the current state.
    pub fn fire(&mut self, event: &str) -> Result<Outcome<S>, DispatchError> {
        self.dispatch(self.current, event)
    }

    /// Resolve the next state for `event` from `from`.
    ///
    /// The first rule of the event, in registration order, whose source
    /// is `from` and whose guard passes is taken. A compound target is
    /// redirected through entry points. A resolved target equal to `from`
    /// fires the event's `self` callbacks only; otherwise `before`
    /// callbacks run, the current state is assigned, then `after`
    /// callbacks run.
    ///
    /// Rejections and unknown events leave the current state untouched.
    /// A failing callback stops its chain and is returned as
    /// [`DispatchError::Callback`]; nothing already done is rolled back.
    pub fn next_state_from(&mut self, from: &S, event: &str) -> Result<Outcome<S>, DispatchError> {
        let Some(id) = self.definition.registry.id_of(from) else {
            if self.event_with_name(event).is_none() {
                return Err(DispatchError::UnknownEvent {
                    event: event.to_string(),
                });
            }
            return Err(DispatchError::UnknownState {
                state: from.name().to_string(),
            });
        };
        self.dispatch(id, event)
    }

    fn dispatch(&mut self, from: StateId, event: &str) -> Result<Outcome<S>, DispatchError> {
        let definition = &*self.definition;
        let registry = &definition.registry;

        let Some(descriptor) = definition.events.event_with_name(event) else {
            debug!(machine = %self.id, event, "unknown event");
            return Err(DispatchError::UnknownEvent {
                event: event.to_string(),
            });
        };

        let Some(rule) = descriptor.first_match(from, registry) else {
            debug!(
                machine = %self.id,
                event,
                from = registry.state(from).name(),
                "event rejected"
            );
            return Ok(Outcome::Rejected);
        };

        let target = registry.resolve_entry(rule.to());
        let from_state = registry.state(from);
        let to_state = registry.state(target);
        let ctx = TransitionContext::new(descriptor.name(), from_state, to_state);

        if from == target {
            definition
                .callbacks
                .dispatch(descriptor.name(), Phase::SelfTransition, &ctx)
                .map_err(|failure| callback_error(self.id, event, false, failure))?;
            debug!(machine = %self.id, event, state = to_state.name(), "self transition");
            return Ok(Outcome::Stayed(to_state.clone()));
        }

        definition
            .callbacks
            .dispatch(descriptor.name(), Phase::Before, &ctx)
            .map_err(|failure| callback_error(self.id, event, false, failure))?;

        self.current = target;
        self.history.push(StateTransition {
            event: event.to_string(),
            from: from_state.clone(),
            to: to_state.clone(),
            timestamp: Utc::now(),
        });
        debug!(
            machine = %self.id,
            event,
            from = from_state.name(),
            to = to_state.name(),
            "transitioned"
        );

        definition
            .callbacks
            .dispatch(descriptor.name(), Phase::After, &ctx)
            .map_err(|failure| callback_error(self.id, event, true, failure))?;

        Ok(Outcome::Moved {
            from: from_state.clone(),
            to: to_state.clone(),
        })
    }
}

fn callback_error(
    machine: Uuid,
    event: &str,
    state_changed: bool,
    failure: CallbackFailure,
) -> DispatchError {
    warn!(
        machine = %machine,
        event,
        phase = %failure.phase,
        index = failure.index,
        state_changed,
        error = %failure.source,
        "callback failed"
    );
    DispatchError::Callback {
        event: event.to_string(),
        state_changed,
        failure,
    }
}

impl<S: State> Clone for StateMachine<S> {
    /// A new instance with its own id, sharing the definition and
    /// starting from this instance's current state and history.
    fn clone(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            definition: Arc::clone(&self.definition),
            current: self.current,
            history: self.history.clone(),
        }
    }
}
