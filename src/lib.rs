//! Statechart: a hierarchical state machine engine
//!
//! A host application declares states (including nested compound states
//! with entry and exit points), events with guarded transition rules, and
//! callbacks fired around transitions. At runtime the engine resolves the
//! next state for a (state, event) pair.
//!
//! # Core Concepts
//!
//! - **State**: A checked enumeration implementing the `State` trait
//! - **Compound state**: A state with children; transitions into it are
//!   redirected to its entry point
//! - **Event**: A named trigger with an ordered list of guarded rules; the
//!   first eligible rule wins
//! - **Callbacks**: `before`/`after` flank real state changes, `self` fires
//!   when a rule leads back to where it started
//!
//! # Example
//!
//! ```rust
//! use statechart::builder::StateMachineBuilder;
//! use statechart::core::TransitionContext;
//! use statechart::engine::Outcome;
//! use statechart::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!         Locked,
//!         Bolted,
//!     }
//! }
//!
//! let mut door = StateMachineBuilder::new()
//!     .add_states([Door::Closed, Door::Open, Door::Locked])?
//!     .add_compound_state(Door::Bolted, Door::Locked)?
//!     .set_entry_point(Door::Bolted)?
//!     .set_initial_state(Door::Closed)?
//!     .on("open", Door::Closed, Door::Open)?
//!     .on("close", Door::Open, Door::Closed)?
//!     .on("lock", Door::Closed, Door::Locked)?
//!     .after("lock", |ctx: &TransitionContext<'_, Door>| {
//!         assert_eq!(ctx.to, &Door::Bolted);
//!         Ok(())
//!     })
//!     .build()?;
//!
//! assert!(door.fire("close")?.is_rejected());
//! assert_eq!(door.fire("lock")?, Outcome::Moved { from: Door::Closed, to: Door::Bolted });
//! assert!(door.is_in(&Door::Locked));
//! assert!(door.event_with_name("knock").is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audit;
pub mod builder;
pub mod callbacks;
pub mod core;
pub mod engine;
pub mod events;

// Re-export commonly used types
pub use crate::builder::{ConfigError, StateMachineBuilder};
pub use crate::callbacks::{CallbackError, Phase};
pub use crate::core::{Guard, State, StateHistory, StateId, StateTransition, TransitionContext};
pub use crate::engine::{Definition, DispatchError, Outcome, StateMachine};
pub use crate::events::{Event, EventId};
