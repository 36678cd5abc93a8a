//! Validation-based audit of state machine configurations.
//!
//! Configuration calls fail fast on hard errors. The audit looks at the
//! finished definition for legal but suspicious setups and uses Stillwater's
//! `Validation` to report every finding in one pass rather than the first.
//!
//! # Example
//!
//! ```rust
//! use statechart::audit::AuditFinding;
//! use statechart::builder::StateMachineBuilder;
//! use statechart::state_enum;
//! use stillwater::validation::Validation;
//!
//! state_enum! {
//!     enum Job {
//!         Queued,
//!         Done,
//!     }
//! }
//!
//! let definition = StateMachineBuilder::new()
//!     .add_states([Job::Queued, Job::Done])?
//!     .set_initial_state(Job::Queued)?
//!     .set_final_state(Job::Done)?
//!     .on("retry", Job::Done, Job::Queued)?
//!     .build_definition()?;
//!
//! match definition.audit() {
//!     Validation::Failure(findings) => assert!(findings
//!         .iter()
//!         .any(|f| matches!(f, AuditFinding::FinalStateHasRules { .. }))),
//!     Validation::Success(_) => unreachable!(),
//! }
//! # Ok::<(), statechart::builder::ConfigError>(())
//! ```

pub mod findings;
pub mod rules;

pub use findings::AuditFinding;
pub use rules::AuditResult;
