//! The transition engine.
//!
//! A [`Definition`] is the frozen result of configuration. A
//! [`StateMachine`] pairs a shared definition with one current state and
//! resolves events against it:
//!
//! 1. The event is looked up; unknown events are errors.
//! 2. The first rule for the source state with a passing guard is taken.
//! 3. No rule means the event is rejected, which is a normal outcome.
//! 4. Compound targets are redirected through their entry points.
//! 5. Self-transitions fire `self` callbacks; real changes fire `before`,
//!    assign the state, then fire `after`.

mod definition;
mod machine;
mod outcome;

pub use definition::Definition;
pub use machine::StateMachine;
pub use outcome::{DispatchError, Outcome};
