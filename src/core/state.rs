//! Core State trait and interned state identifiers.
//!
//! Host applications describe their states as a checked enumeration that
//! implements [`State`]. The registry interns every declared value into a
//! [`StateId`], and the engine works on identifiers from then on.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are plain values that
/// name a node of the statechart; nesting, entry and exit points are
/// declared on the builder, not on the type.
///
/// # Required Traits
///
/// - `Clone`: States are handed back to callers and recorded in history
/// - `Eq` + `Hash`: States are interned into identifiers
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: History records can be exported
///
/// # Example
///
/// ```rust
/// use statechart::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
///     Locked,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Locked => "Locked",
///         }
///     }
/// }
///
/// assert_eq!(Door::Locked.name(), "Locked");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

/// Stable identifier of a declared state.
///
/// Identifiers are indices into the registry that issued them and are only
/// meaningful for that registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
