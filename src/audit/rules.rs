//! Audit checks over a finished definition, using Validation.

use crate::audit::findings::AuditFinding;
use crate::core::{State, StateId};
use crate::engine::Definition;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of auditing a definition.
pub type AuditResult = Validation<(), NonEmptyVec<AuditFinding>>;

impl<S: State> Definition<S> {
    /// Inspect the configuration, accumulating ALL findings.
    ///
    /// Returns `Validation::Success(())` for a clean configuration.
    /// Findings are advisory; a definition with findings still works.
    pub fn audit(&self) -> AuditResult {
        let mut checks: Vec<AuditResult> = Vec::new();

        checks.extend(self.check_final_state());
        checks.extend(self.check_compound_targets());
        checks.extend(self.check_shadowed_rules());
        checks.extend(self.check_exit_points());
        checks.extend(self.check_callback_events());

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_final_state(&self) -> Vec<AuditResult> {
        let Some(final_state) = self.final_state else {
            return Vec::new();
        };

        self.events
            .events()
            .iter()
            .filter(|event| event.has_rules_from(final_state))
            .map(|event| {
                Validation::fail(AuditFinding::FinalStateHasRules {
                    state: self.registry.state(final_state).name().to_string(),
                    event: event.name().to_string(),
                })
            })
            .collect()
    }

    fn check_compound_targets(&self) -> Vec<AuditResult> {
        let mut reported: HashSet<(usize, StateId)> = HashSet::new();
        let mut checks = Vec::new();

        for event in self.events.events() {
            for rule in event.rules() {
                let resolved = self.registry.resolve_entry(rule.to());
                if !self.registry.is_compound(resolved) {
                    continue;
                }
                if reported.insert((event.id().index(), resolved)) {
                    checks.push(Validation::fail(AuditFinding::CompoundWithoutEntry {
                        state: self.registry.state(resolved).name().to_string(),
                        event: event.name().to_string(),
                    }));
                }
            }
        }
        checks
    }

    fn check_shadowed_rules(&self) -> Vec<AuditResult> {
        let mut checks = Vec::new();

        for event in self.events.events() {
            let mut unconditional: HashSet<StateId> = HashSet::new();
            for (position, rule) in event.rules().iter().enumerate() {
                if unconditional.contains(&rule.from()) {
                    checks.push(Validation::fail(AuditFinding::UnreachableRule {
                        event: event.name().to_string(),
                        from: self.registry.state(rule.from()).name().to_string(),
                        position,
                    }));
                    continue;
                }
                if rule.guard().constant_value() == Some(true) {
                    unconditional.insert(rule.from());
                }
            }
        }
        checks
    }

    fn check_exit_points(&self) -> Vec<AuditResult> {
        (0..self.registry.len())
            .map(StateId)
            .filter(|id| {
                self.registry.exit_point(*id).is_some() && self.registry.entry_point(*id).is_none()
            })
            .map(|id| {
                Validation::fail(AuditFinding::ExitPointWithoutEntry {
                    state: self.registry.state(id).name().to_string(),
                })
            })
            .collect()
    }

    fn check_callback_events(&self) -> Vec<AuditResult> {
        self.callbacks
            .event_names()
            .filter(|name| self.events.event_with_name(name).is_none())
            .map(|name| {
                Validation::fail(AuditFinding::CallbacksWithoutEvent {
                    event: name.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::core::{Guard, TransitionContext};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Active,
        Active1,
        Active2,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Active => "Active",
                Self::Active1 => "Active1",
                Self::Active2 => "Active2",
                Self::Done => "Done",
            }
        }
    }

    fn builder() -> StateMachineBuilder<TestState> {
        StateMachineBuilder::new()
            .add_states([TestState::Idle, TestState::Active, TestState::Done])
            .unwrap()
            .add_compound_state(TestState::Active1, TestState::Active)
            .unwrap()
            .add_compound_state(TestState::Active2, TestState::Active)
            .unwrap()
            .set_initial_state(TestState::Idle)
            .unwrap()
            .set_final_state(TestState::Done)
            .unwrap()
    }

    #[test]
    fn clean_definition_passes() {
        let definition = builder()
            .set_entry_point(TestState::Active1)
            .unwrap()
            .on("start", TestState::Idle, TestState::Active)
            .unwrap()
            .on("finish", TestState::Active1, TestState::Done)
            .unwrap()
            .build_definition()
            .unwrap();

        assert!(definition.audit().is_success());
    }

    #[test]
    fn audit_accumulates_all_findings() {
        let definition = builder()
            .set_exit_point(TestState::Active2)
            .unwrap()
            .on("start", TestState::Idle, TestState::Active)
            .unwrap()
            .on("start", TestState::Idle, TestState::Done)
            .unwrap()
            .on("restart", TestState::Done, TestState::Idle)
            .unwrap()
            .build_definition()
            .unwrap();

        match definition.audit() {
            Validation::Failure(findings) => {
                assert_eq!(findings.len(), 4);

                let has_final = findings
                    .iter()
                    .any(|f| matches!(f, AuditFinding::FinalStateHasRules { .. }));
                let has_compound = findings
                    .iter()
                    .any(|f| matches!(f, AuditFinding::CompoundWithoutEntry { .. }));
                let has_shadowed = findings.iter().any(|f| {
                    matches!(f, AuditFinding::UnreachableRule { position: 1, .. })
                });
                let has_exit = findings
                    .iter()
                    .any(|f| matches!(f, AuditFinding::ExitPointWithoutEntry { .. }));

                assert!(has_final);
                assert!(has_compound);
                assert!(has_shadowed);
                assert!(has_exit);
            }
            Validation::Success(_) => panic!("Expected findings, got success"),
        }
    }

    #[test]
    fn conditional_rules_are_not_shadowing() {
        let definition = builder()
            .set_entry_point(TestState::Active1)
            .unwrap()
            .when(
                "start",
                Guard::new(|_c: &TransitionContext<'_, TestState>| true),
                TestState::Idle,
                TestState::Active,
            )
            .unwrap()
            .when("start", false, TestState::Idle, TestState::Done)
            .unwrap()
            .on("start", TestState::Idle, TestState::Active2)
            .unwrap()
            .build_definition()
            .unwrap();

        assert!(definition.audit().is_success());
    }

    #[test]
    fn compound_target_is_reported_once_per_event() {
        let definition = builder()
            .on("enter", TestState::Idle, TestState::Active)
            .unwrap()
            .on("enter", TestState::Done, TestState::Active)
            .unwrap()
            .build_definition()
            .unwrap();

        let findings = match definition.audit() {
            Validation::Failure(findings) => findings,
            Validation::Success(_) => panic!("Expected findings, got success"),
        };
        let compound = findings
            .iter()
            .filter(|f| matches!(f, AuditFinding::CompoundWithoutEntry { .. }))
            .count();
        assert_eq!(compound, 1);
    }

    #[test]
    fn callbacks_for_unknown_event_are_reported() {
        let definition = builder()
            .set_entry_point(TestState::Active1)
            .unwrap()
            .on("start", TestState::Idle, TestState::Active)
            .unwrap()
            .before("start", |_c: &TransitionContext<'_, TestState>| Ok(()))
            .before("strat", |_c: &TransitionContext<'_, TestState>| Ok(()))
            .build_definition()
            .unwrap();

        let findings = match definition.audit() {
            Validation::Failure(findings) => findings,
            Validation::Success(_) => panic!("Expected findings, got success"),
        };
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings.iter().next(),
            Some(&AuditFinding::CallbacksWithoutEvent {
                event: "strat".to_string()
            })
        );
    }
}
