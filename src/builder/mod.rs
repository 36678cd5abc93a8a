//! Builder API for configuring state machines.
//!
//! This module provides the fluent builder and the `state_enum!` macro for
//! declaring states, rules and callbacks with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::ConfigError;
pub use machine::StateMachineBuilder;
