//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions of a [`TransitionContext`]. The engine
//! evaluates them on every dispatch; a result is never cached.

use super::context::TransitionContext;
use super::state::State;
use std::fmt;
use std::sync::Arc;

type Predicate<S> = Arc<dyn Fn(&TransitionContext<'_, S>) -> bool + Send + Sync>;

/// Pure predicate that determines if a transition rule is eligible.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Guard, State, TransitionContext};
/// use serde::{Deserialize, Serialize};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// let has_key = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&has_key);
/// let guard = Guard::new(move |_ctx: &TransitionContext<'_, Door>| flag.load(Ordering::SeqCst));
///
/// let ctx = TransitionContext::new("open", &Door::Closed, &Door::Open);
/// assert!(!guard.check(&ctx));
///
/// // Re-evaluated on every check.
/// has_key.store(true, Ordering::SeqCst);
/// assert!(guard.check(&ctx));
/// ```
pub struct Guard<S: State> {
    predicate: Predicate<S>,
    constant: Option<bool>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic for a given host state and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionContext<'_, S>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            constant: None,
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Self::constant(true)
    }

    /// A guard that never passes.
    pub fn never() -> Self {
        Self::constant(false)
    }

    fn constant(value: bool) -> Self {
        Guard {
            predicate: Arc::new(move |_: &TransitionContext<'_, S>| value),
            constant: Some(value),
        }
    }

    /// Evaluate the guard for this transition.
    pub fn check(&self, ctx: &TransitionContext<'_, S>) -> bool {
        (self.predicate)(ctx)
    }

    /// The fixed result of a guard built with [`Guard::always`],
    /// [`Guard::never`] or from a `bool`; `None` for closures.
    pub fn constant_value(&self) -> Option<bool> {
        self.constant
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            constant: self.constant,
        }
    }
}

impl<S: State> Default for Guard<S> {
    fn default() -> Self {
        Self::always()
    }
}

impl<S: State> From<bool> for Guard<S> {
    fn from(value: bool) -> Self {
        Self::constant(value)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constant {
            Some(value) => write!(f, "Guard({value})"),
            None => f.write_str("Guard(<predicate>)"),
        }
    }
}
