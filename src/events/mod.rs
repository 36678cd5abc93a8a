//! Events and their guarded transition rules.
//!
//! Each event owns an ordered rule list. Order is significant: the first
//! eligible rule for the current state is the one taken.

mod rule;
mod table;

pub use rule::TransitionRule;
pub use table::{Event, EventId, EventTable};
