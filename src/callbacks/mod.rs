//! Lifecycle callbacks fired around transitions.
//!
//! `before` and `after` callbacks flank a genuine state change. `self`
//! callbacks fire instead of them when a matched rule leads back to the
//! state it started from.

mod dispatcher;
mod error;

pub use dispatcher::{Callback, CallbackDispatcher, Phase};
pub use error::{CallbackError, CallbackFailure};
