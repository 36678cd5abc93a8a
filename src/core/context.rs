//! Context handed to guards and callbacks.

use super::state::State;

/// The transition being considered or carried out.
///
/// Guards see `to` as the rule's declared target. Callbacks see the
/// effective destination, after compound targets were redirected to their
/// entry points.
#[derive(Debug)]
pub struct TransitionContext<'a, S: State> {
    pub event: &'a str,
    pub from: &'a S,
    pub to: &'a S,
}

impl<'a, S: State> TransitionContext<'a, S> {
    pub fn new(event: &'a str, from: &'a S, to: &'a S) -> Self {
        Self { event, from, to }
    }

    /// `true` when the transition does not change the state.
    pub fn is_self_transition(&self) -> bool {
        self.from == self.to
    }
}

impl<S: State> Clone for TransitionContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: State> Copy for TransitionContext<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Light {
        Red,
        Green,
    }

    impl State for Light {
        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Green => "Green",
            }
        }
    }

    #[test]
    fn detects_self_transition() {
        let ctx = TransitionContext::new("tick", &Light::Red, &Light::Red);
        assert!(ctx.is_self_transition());

        let ctx = TransitionContext::new("tick", &Light::Red, &Light::Green);
        assert!(!ctx.is_self_transition());
        assert_eq!(ctx.event, "tick");
    }
}
