//! Core statechart types.
//!
//! This module contains the building blocks shared by every other module:
//! - States via the `State` trait, interned into `StateId`s
//! - The `StateRegistry` holding the compound-state containment tree
//! - Guard predicates over a `TransitionContext`
//! - Immutable history tracking

mod context;
mod guard;
mod history;
mod registry;
mod state;

pub use context::TransitionContext;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use registry::{Marker, StateRegistry};
pub use state::{State, StateId};
