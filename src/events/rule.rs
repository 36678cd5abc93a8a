//! Guarded transition rules.

use crate::core::{Guard, State, StateId, StateRegistry, TransitionContext};

/// One `(from, to, guard)` rule registered against an event.
pub struct TransitionRule<S: State> {
    pub(crate) from: StateId,
    pub(crate) to: StateId,
    pub(crate) guard: Guard<S>,
}

impl<S: State> TransitionRule<S> {
    pub fn from(&self) -> StateId {
        self.from
    }

    /// The declared target, before any entry-point redirection.
    pub fn to(&self) -> StateId {
        self.to
    }

    pub fn guard(&self) -> &Guard<S> {
        &self.guard
    }

    /// Check if this rule applies to `from` right now.
    ///
    /// The guard is only evaluated when the source state matches.
    pub fn can_execute(&self, from: StateId, event: &str, registry: &StateRegistry<S>) -> bool {
        if from != self.from {
            return false;
        }

        let ctx = TransitionContext::new(event, registry.state(self.from), registry.state(self.to));
        self.guard.check(&ctx)
    }
}

impl<S: State> Clone for TransitionRule<S> {
    fn clone(&self) -> Self {
        Self {
            from: self.from,
            to: self.to,
            guard: self.guard.clone(),
        }
    }
}

impl<S: State> std::fmt::Debug for TransitionRule<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guard", &self.guard)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::End => "End",
            }
        }
    }

    fn registry() -> (StateRegistry<TestState>, StateId, StateId, StateId) {
        let mut registry = StateRegistry::new();
        let start = registry.add_state(TestState::Start).unwrap();
        let middle = registry.add_state(TestState::Middle).unwrap();
        let end = registry.add_state(TestState::End).unwrap();
        (registry, start, middle, end)
    }

    #[test]
    fn can_execute_matches_from_state() {
        let (registry, start, middle, _) = registry();
        let rule = TransitionRule {
            from: start,
            to: middle,
            guard: Guard::always(),
        };

        assert!(rule.can_execute(start, "next", &registry));
        assert!(!rule.can_execute(middle, "next", &registry));
    }

    #[test]
    fn can_execute_respects_guard() {
        let (registry, start, middle, end) = registry();
        let rule = TransitionRule {
            from: middle,
            to: end,
            guard: Guard::new(|c: &TransitionContext<'_, TestState>| {
                c.from == &TestState::Middle && c.to == &TestState::End && c.event == "finish"
            }),
        };

        assert!(rule.can_execute(middle, "finish", &registry));
        assert!(!rule.can_execute(middle, "next", &registry));
        assert!(!rule.can_execute(start, "finish", &registry));
    }

    #[test]
    fn guard_is_skipped_for_other_states() {
        let (registry, start, middle, _) = registry();
        let rule = TransitionRule {
            from: start,
            to: middle,
            guard: Guard::new(|_c: &TransitionContext<'_, TestState>| {
                panic!("guard must not run for a non-matching state")
            }),
        };

        assert!(!rule.can_execute(middle, "next", &registry));
    }
}
