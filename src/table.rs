use super::{BuildError, StateKind};
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};
use tracing::warn;

/// State and transition storage shared by both automaton kinds.
///
/// Every registered state owns an ordered list of outgoing `(label, to)` pairs.
/// The label type is whatever the owning automaton consumes on an edge.
#[derive(Debug, Clone)]
pub struct TransitionTable<S, L> {
	transitions: BTreeMap<S, Vec<(L, S)>>,
	accepting: BTreeSet<S>,
	starting: Option<S>,
}

impl<S, L> Default for TransitionTable<S, L> {
	fn default() -> Self {
		Self {
			transitions: BTreeMap::new(),
			accepting: BTreeSet::new(),
			starting: None,
		}
	}
}

impl<S, L> TransitionTable<S, L>
where
	S: Clone + Ord + fmt::Debug,
{
	/// Creates a new empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Checks whether a state is registered.
	pub fn has_state(&self, id: &S) -> bool {
		self.transitions.contains_key(id)
	}

	/// Registers a state.
	/// A starting state replaces any previously registered one.
	pub fn add_state(&mut self, id: S, kind: StateKind) -> Result<(), BuildError<S>> {
		if self.has_state(&id) {
			warn!(state = ?id, "state already in automaton");
			return Err(BuildError::DuplicateState(id));
		}

		if kind.is_accepting() {
			self.accepting.insert(id.clone());
		}
		if kind.is_starting() {
			self.starting = Some(id.clone());
		}
		self.transitions.insert(id, Vec::new());
		Ok(())
	}

	/// Appends an edge to the outgoing list of `from`.
	/// Both endpoints must already be registered.
	pub fn add_transition(&mut self, from: S, on: L, to: S) -> Result<(), BuildError<S>> {
		if !self.has_state(&to) {
			warn!(from = ?from, to = ?to, "transition target not in automaton");
			return Err(BuildError::InexistentState(to));
		}
		match self.transitions.get_mut(&from) {
			Some(edges) => {
				edges.push((on, to));
				Ok(())
			}
			None => {
				warn!(from = ?from, to = ?to, "transition source not in automaton");
				Err(BuildError::InexistentState(from))
			}
		}
	}

	/// Returns the outgoing edges of a state in insertion order.
	/// Unknown states have no edges.
	pub fn transitions_from(&self, id: &S) -> &[(L, S)] {
		match self.transitions.get(id) {
			Some(edges) => edges,
			None => &[],
		}
	}

	/// Checks whether a state is accepting.
	pub fn is_accepting(&self, id: &S) -> bool {
		self.accepting.contains(id)
	}

	/// Gets the set of accepting states.
	pub fn accepting_states(&self) -> &BTreeSet<S> {
		&self.accepting
	}

	/// Gets the starting state, if one was registered.
	pub fn starting_state(&self) -> Option<&S> {
		self.starting.as_ref()
	}

	/// Iterates over all registered states in order.
	pub fn states(&self) -> impl Iterator<Item = &S> {
		self.transitions.keys()
	}
}
