use super::{Automaton, BuildError, StateKind, TransitionTable};
use std::{collections::BTreeSet, fmt};
use tracing::trace;

/// A deterministic finite state automaton.
///
/// At most one transition per state and input is expected. When more are added,
/// the first one registered wins.
#[derive(Debug, Clone)]
pub struct DFA<S, I> {
	table: TransitionTable<S, I>,
	current: Option<S>,
	aborted: bool,
}

impl<S, I> Default for DFA<S, I> {
	fn default() -> Self {
		Self {
			table: TransitionTable::default(),
			current: None,
			aborted: false,
		}
	}
}

impl<S, I> DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: PartialEq + fmt::Debug,
{
	/// Gets the current state.
	/// Returns None if no starting state was registered.
	pub fn current(&self) -> Option<&S> {
		self.current.as_ref()
	}

	/// Gets the starting state, if one was registered.
	pub fn starting_state(&self) -> Option<&S> {
		self.table.starting_state()
	}

	/// Gets the set of accepting states.
	pub fn accepting_states(&self) -> &BTreeSet<S> {
		self.table.accepting_states()
	}

	/// Returns the outgoing transitions of a state in insertion order.
	pub fn transitions_from(&self, id: &S) -> &[(I, S)] {
		self.table.transitions_from(id)
	}
}

impl<S, I> Automaton<I> for DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: PartialEq + fmt::Debug,
{
	type State = S;
	type Symbol = I;

	fn has_state(&self, id: &S) -> bool {
		self.table.has_state(id)
	}

	fn add_state(&mut self, id: S, kind: StateKind) -> Result<(), BuildError<S>> {
		self.table.add_state(id, kind)?;
		if kind.is_starting() {
			self.reset();
		}
		Ok(())
	}

	fn add_transition(&mut self, from: S, on: I, to: S) -> Result<(), BuildError<S>> {
		self.table.add_transition(from, on, to)
	}

	fn step(&mut self, input: &I) {
		if self.aborted {
			return;
		}
		let next = self.current.as_ref().and_then(|current| {
			self.table
				.transitions_from(current)
				.iter()
				.find(|(on, _)| on == input)
				.map(|(_, to)| to.clone())
		});
		match next {
			Some(next) => {
				trace!(from = ?self.current, ?input, to = ?next, "dfa step");
				self.current = Some(next);
			}
			None => {
				trace!(from = ?self.current, ?input, "dfa has no transition");
				self.aborted = true;
			}
		}
	}

	fn has_aborted(&self) -> bool {
		self.aborted
	}

	fn is_accepting(&self) -> bool {
		match &self.current {
			Some(current) => self.table.is_accepting(current),
			None => false,
		}
	}

	fn reset(&mut self) {
		self.current = self.table.starting_state().cloned();
		self.aborted = false;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::accepts;

	fn example() -> DFA<u32, char> {
		let mut dfa = DFA::new();
		dfa.add_state(0, StateKind::Starting | StateKind::Accepting)
			.unwrap();
		dfa.add_state(1, StateKind::None).unwrap();
		dfa.add_state(2, StateKind::None).unwrap();
		dfa.add_state(3, StateKind::Accepting).unwrap();
		dfa.add_transition(0, 'a', 1).unwrap();
		dfa.add_transition(0, 'b', 2).unwrap();
		dfa.add_transition(2, 'a', 3).unwrap();
		dfa
	}

	fn chars(input: &str) -> Vec<char> {
		input.chars().collect()
	}

	#[test]
	fn construct() {
		let mut dfa = DFA::<u32, char>::new();
		assert_eq!(None, dfa.current(), "Empty DFA has a current state");
		dfa.add_state(0, StateKind::Starting).unwrap();
		dfa.add_state(1, StateKind::Accepting).unwrap();
		dfa.add_transition(0, 'a', 1).unwrap();

		assert!(dfa.has_state(&0), "Initially added state missing");
		assert!(dfa.has_state(&1), "Later added state missing");
		assert!(!dfa.is_accepting(), "Initial state incorrectly accepting");
		assert_eq!(Some(&0), dfa.current(), "Initial state not set correctly");
		assert_eq!(Some(&0), dfa.starting_state());
		assert_eq!(&[('a', 1)], dfa.transitions_from(&0));
	}

	#[test]
	fn rejected_mutations() {
		let mut dfa = example();
		assert_eq!(
			Err(BuildError::DuplicateState(1)),
			dfa.add_state(1, StateKind::Starting)
		);
		assert_eq!(Some(&0), dfa.current(), "Rejected state moved the cursor");
		assert_eq!(
			Err(BuildError::InexistentState(9)),
			dfa.add_transition(1, 'a', 9)
		);
		assert!(
			dfa.transitions_from(&1).is_empty(),
			"Rejected transition stored"
		);
	}

	#[test]
	fn run() {
		let mut dfa = example();

		assert!(accepts(&mut dfa, &chars("")), "Empty input rejected");
		dfa.reset();
		assert!(accepts(&mut dfa, &chars("ba")), "\"ba\" rejected");
		dfa.reset();
		assert!(!accepts(&mut dfa, &chars("bb")), "\"bb\" accepted");
		assert!(dfa.has_aborted(), "\"bb\" did not abort");
		dfa.reset();
		assert!(!accepts(&mut dfa, &chars("cx")), "\"cx\" accepted");
		assert!(dfa.has_aborted(), "\"cx\" did not abort");
		dfa.reset();
		assert!(!accepts(&mut dfa, &chars("a")), "\"a\" accepted");
		assert!(!dfa.has_aborted(), "\"a\" aborted");
	}

	#[test]
	fn empty_input_ignores_transitions() {
		let mut dfa = DFA::<u32, char>::new();
		dfa.add_state(0, StateKind::Starting).unwrap();
		dfa.add_state(1, StateKind::Accepting).unwrap();
		dfa.add_transition(0, 'a', 1).unwrap();
		assert!(!accepts(&mut dfa, &chars("")), "Non-accepting start accepted");
		assert_eq!(Some(&0), dfa.current(), "Empty input moved the cursor");
	}

	#[test]
	fn abort_is_sticky() {
		let mut dfa = example();
		dfa.step(&'b');
		dfa.step(&'b');
		assert!(dfa.has_aborted());
		dfa.step(&'a');
		assert!(dfa.has_aborted(), "Abort cleared without reset");
		assert!(!dfa.is_accepting(), "Aborted DFA moved on");

		dfa.reset();
		dfa.reset();
		assert!(!dfa.has_aborted(), "Reset did not clear abort");
		assert_eq!(Some(&0), dfa.current(), "Reset did not restore start");
		assert!(dfa.is_accepting());
	}

	#[test]
	fn first_transition_wins() {
		let mut dfa = DFA::<u32, char>::new();
		dfa.add_state(0, StateKind::Starting).unwrap();
		dfa.add_state(1, StateKind::Accepting).unwrap();
		dfa.add_state(2, StateKind::None).unwrap();
		dfa.add_transition(0, 'a', 1).unwrap();
		dfa.add_transition(0, 'a', 2).unwrap();
		assert!(dfa.run(&['a']), "Later duplicate transition was taken");
	}

	#[test]
	fn starting_last_wins() {
		let mut dfa = DFA::<u32, char>::new();
		dfa.add_state(0, StateKind::Starting).unwrap();
		dfa.add_state(1, StateKind::StartingAccepting).unwrap();
		assert_eq!(Some(&1), dfa.current());
		dfa.reset();
		assert_eq!(Some(&1), dfa.current());
		assert!(dfa.is_accepting());
	}

	#[test]
	fn starting_state_after_abort() {
		let mut dfa = example();
		assert!(!accepts(&mut dfa, &['x']));
		assert!(dfa.has_aborted());

		dfa.add_state(4, StateKind::StartingAccepting).unwrap();
		assert!(!dfa.has_aborted(), "New start kept the abort flag");
		assert_eq!(Some(&4), dfa.current(), "New start not applied");
		assert!(dfa.is_accepting());
	}

	#[test]
	fn no_starting_state() {
		let mut dfa = DFA::<u32, char>::new();
		dfa.add_state(0, StateKind::Accepting).unwrap();
		dfa.add_transition(0, 'a', 0).unwrap();
		assert!(!dfa.is_accepting(), "Missing start is accepting");
		assert!(!accepts(&mut dfa, &['a']), "Missing start accepted input");
		assert!(dfa.has_aborted());
	}

	#[test]
	fn run_resets() {
		let mut dfa = example();
		assert!(!dfa.run(&chars("bb")), "Incorrect result on rejecting run");
		assert!(!dfa.has_aborted(), "Run left the DFA aborted");
		assert!(dfa.run(&chars("ba")), "Incorrect result on accepting run");
		assert_eq!(Some(&0), dfa.current(), "Incorrect state after run");
	}
}
