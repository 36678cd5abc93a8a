//! Registry of declared states and their containment tree.
//!
//! Containment is a parent-pointer forest. Every insertion walks the
//! ancestors of the new parent, so a cycle can never be stored.

use super::state::{State, StateId};
use crate::builder::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which designated child of a compound state is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Entry,
    Exit,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Entry => f.write_str("entry"),
            Marker::Exit => f.write_str("exit"),
        }
    }
}

#[derive(Clone, Debug)]
struct StateNode<S: State> {
    state: S,
    parent: Option<StateId>,
    children: Vec<StateId>,
    entry: Option<StateId>,
    exit: Option<StateId>,
}

impl<S: State> StateNode<S> {
    fn new(state: S, parent: Option<StateId>) -> Self {
        Self {
            state,
            parent,
            children: Vec::new(),
            entry: None,
            exit: None,
        }
    }
}

/// The set of declared states.
#[derive(Clone, Debug)]
pub struct StateRegistry<S: State> {
    nodes: Vec<StateNode<S>>,
    index: HashMap<S, StateId>,
}

impl<S: State> Default for StateRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateRegistry<S> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Declare a top-level state.
    pub fn add_state(&mut self, state: S) -> Result<StateId, ConfigError> {
        if self.index.contains_key(&state) {
            return Err(ConfigError::DuplicateState {
                state: state.name().to_string(),
            });
        }
        Ok(self.insert(state, None))
    }

    /// Declare `state` as a child of `parent`, making `parent` compound.
    ///
    /// A state that is already declared at the top level is moved under
    /// `parent`. A state that already has a parent is a duplicate.
    pub fn add_compound_state(&mut self, state: S, parent: &S) -> Result<StateId, ConfigError> {
        let parent_id = self.require(parent)?;

        let Some(existing) = self.id_of(&state) else {
            let id = self.insert(state, Some(parent_id));
            self.nodes[parent_id.0].children.push(id);
            return Ok(id);
        };

        if self.is_descendant_of(parent_id, existing) {
            return Err(ConfigError::CycleDetected {
                state: state.name().to_string(),
                parent: parent.name().to_string(),
            });
        }
        if self.nodes[existing.0].parent.is_some() {
            return Err(ConfigError::DuplicateState {
                state: state.name().to_string(),
            });
        }

        self.nodes[existing.0].parent = Some(parent_id);
        self.nodes[parent_id.0].children.push(existing);
        Ok(existing)
    }

    /// Make `state` the entry point of its parent.
    pub fn set_entry_point(&mut self, state: &S) -> Result<(), ConfigError> {
        self.set_marker(state, Marker::Entry)
    }

    /// Make `state` the exit point of its parent.
    pub fn set_exit_point(&mut self, state: &S) -> Result<(), ConfigError> {
        self.set_marker(state, Marker::Exit)
    }

    fn set_marker(&mut self, state: &S, marker: Marker) -> Result<(), ConfigError> {
        let id = self.require(state)?;
        let parent = self.nodes[id.0]
            .parent
            .ok_or_else(|| ConfigError::NotAChild {
                state: state.name().to_string(),
                marker,
            })?;

        let current = match marker {
            Marker::Entry => self.nodes[parent.0].entry,
            Marker::Exit => self.nodes[parent.0].exit,
        };
        if let Some(existing) = current {
            return Err(ConfigError::AlreadySet {
                parent: self.nodes[parent.0].state.name().to_string(),
                existing: self.nodes[existing.0].state.name().to_string(),
                marker,
            });
        }

        let node = &mut self.nodes[parent.0];
        match marker {
            Marker::Entry => node.entry = Some(id),
            Marker::Exit => node.exit = Some(id),
        }
        Ok(())
    }

    fn insert(&mut self, state: S, parent: Option<StateId>) -> StateId {
        let id = StateId(self.nodes.len());
        self.index.insert(state.clone(), id);
        self.nodes.push(StateNode::new(state, parent));
        id
    }

    /// Look up a state, failing with `UnknownState` when undeclared.
    pub fn require(&self, state: &S) -> Result<StateId, ConfigError> {
        self.id_of(state).ok_or_else(|| ConfigError::UnknownState {
            state: state.name().to_string(),
        })
    }

    pub fn id_of(&self, state: &S) -> Option<StateId> {
        self.index.get(state).copied()
    }

    /// The state behind an identifier issued by this registry.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry.
    pub fn state(&self, id: StateId) -> &S {
        &self.nodes[id.0].state
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.nodes.iter().map(|node| &node.state)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: StateId) -> &[StateId] {
        &self.nodes[id.0].children
    }

    pub fn entry_point(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].entry
    }

    pub fn exit_point(&self, id: StateId) -> Option<StateId> {
        self.nodes[id.0].exit
    }

    pub fn is_compound(&self, id: StateId) -> bool {
        !self.nodes[id.0].children.is_empty()
    }

    /// `true` when `id` equals `ancestor` or is nested anywhere beneath it.
    pub fn is_descendant_of(&self, id: StateId, ancestor: StateId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes[current.0].parent;
        }
        false
    }

    /// Follow entry points down from `id` until a state without one.
    ///
    /// Terminates because the forest is acyclic and entry points are
    /// always children.
    pub fn resolve_entry(&self, id: StateId) -> StateId {
        let mut current = id;
        while let Some(entry) = self.nodes[current.0].entry {
            current = entry;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Node {
        A,
        B,
        B1,
        B2,
        C,
        C1,
    }

    impl State for Node {
        fn name(&self) -> &str {
            match self {
                Self::A => "A",
                Self::B => "B",
                Self::B1 => "B1",
                Self::B2 => "B2",
                Self::C => "C",
                Self::C1 => "C1",
            }
        }
    }

    fn nested() -> StateRegistry<Node> {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::A).unwrap();
        registry.add_state(Node::B).unwrap();
        registry.add_compound_state(Node::B1, &Node::B).unwrap();
        registry.add_compound_state(Node::B2, &Node::B).unwrap();
        registry
    }

    #[test]
    fn duplicate_state_is_rejected() {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::A).unwrap();

        let result = registry.add_state(Node::A);

        assert_eq!(
            result,
            Err(ConfigError::DuplicateState {
                state: "A".to_string()
            })
        );
        assert_eq!(registry.states().filter(|s| **s == Node::A).count(), 1);
    }

    #[test]
    fn compound_state_requires_declared_parent() {
        let mut registry = StateRegistry::new();

        let result = registry.add_compound_state(Node::B1, &Node::B);

        assert!(matches!(result, Err(ConfigError::UnknownState { state }) if state == "B"));
        assert!(registry.is_empty());
    }

    #[test]
    fn compound_state_links_parent_and_child() {
        let registry = nested();
        let b = registry.id_of(&Node::B).unwrap();
        let b1 = registry.id_of(&Node::B1).unwrap();

        assert_eq!(registry.parent(b1), Some(b));
        assert_eq!(registry.children(b).len(), 2);
        assert!(registry.is_compound(b));
        assert!(!registry.is_compound(b1));
        assert!(registry.is_descendant_of(b1, b));
        assert!(!registry.is_descendant_of(b, b1));
    }

    #[test]
    fn reverse_nesting_is_a_cycle() {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::B).unwrap();
        registry.add_compound_state(Node::A, &Node::B).unwrap();

        let result = registry.add_compound_state(Node::B, &Node::A);

        assert!(matches!(result, Err(ConfigError::CycleDetected { .. })));
        let b = registry.id_of(&Node::B).unwrap();
        assert_eq!(registry.parent(b), None);
    }

    #[test]
    fn self_nesting_is_a_cycle() {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::A).unwrap();

        let result = registry.add_compound_state(Node::A, &Node::A);

        assert!(matches!(result, Err(ConfigError::CycleDetected { .. })));
    }

    #[test]
    fn deep_cycle_is_detected() {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::A).unwrap();
        registry.add_compound_state(Node::B, &Node::A).unwrap();
        registry.add_compound_state(Node::C, &Node::B).unwrap();

        let result = registry.add_compound_state(Node::A, &Node::C);

        assert!(matches!(result, Err(ConfigError::CycleDetected { .. })));
    }

    #[test]
    fn top_level_state_can_be_nested_later() {
        let mut registry = StateRegistry::new();
        registry.add_state(Node::B).unwrap();
        registry.add_state(Node::B1).unwrap();

        let id = registry.add_compound_state(Node::B1, &Node::B).unwrap();

        assert_eq!(registry.parent(id), registry.id_of(&Node::B));
    }

    #[test]
    fn already_nested_state_cannot_move() {
        let mut registry = nested();
        registry.add_state(Node::C).unwrap();

        let result = registry.add_compound_state(Node::B1, &Node::C);

        assert!(matches!(result, Err(ConfigError::DuplicateState { .. })));
    }

    #[test]
    fn entry_point_must_be_a_child() {
        let mut registry = nested();

        assert!(matches!(
            registry.set_entry_point(&Node::A),
            Err(ConfigError::NotAChild { marker: Marker::Entry, .. })
        ));
        assert!(matches!(
            registry.set_entry_point(&Node::C),
            Err(ConfigError::UnknownState { .. })
        ));
    }

    #[test]
    fn entry_point_can_only_be_set_once() {
        let mut registry = nested();
        registry.set_entry_point(&Node::B1).unwrap();

        let result = registry.set_entry_point(&Node::B2);

        assert_eq!(
            result,
            Err(ConfigError::AlreadySet {
                parent: "B".to_string(),
                existing: "B1".to_string(),
                marker: Marker::Entry,
            })
        );
    }

    #[test]
    fn entry_and_exit_points_are_independent() {
        let mut registry = nested();
        registry.set_entry_point(&Node::B1).unwrap();
        registry.set_exit_point(&Node::B2).unwrap();

        let b = registry.id_of(&Node::B).unwrap();
        assert_eq!(registry.entry_point(b), registry.id_of(&Node::B1));
        assert_eq!(registry.exit_point(b), registry.id_of(&Node::B2));
        assert!(matches!(
            registry.set_exit_point(&Node::B1),
            Err(ConfigError::AlreadySet { marker: Marker::Exit, .. })
        ));
    }

    #[test]
    fn resolve_entry_follows_nested_entry_points() {
        let mut registry = nested();
        registry.add_compound_state(Node::C, &Node::B).unwrap();
        registry.add_compound_state(Node::C1, &Node::C).unwrap();
        registry.set_entry_point(&Node::C).unwrap();
        registry.set_entry_point(&Node::C1).unwrap();

        let b = registry.id_of(&Node::B).unwrap();
        let c1 = registry.id_of(&Node::C1).unwrap();
        assert_eq!(registry.resolve_entry(b), c1);
    }

    #[test]
    fn resolve_entry_stops_without_entry_point() {
        let registry = nested();
        let b = registry.id_of(&Node::B).unwrap();
        let a = registry.id_of(&Node::A).unwrap();

        assert_eq!(registry.resolve_entry(b), b);
        assert_eq!(registry.resolve_entry(a), a);
    }
}
