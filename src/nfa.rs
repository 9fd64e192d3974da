use super::{Automaton, BuildError, StateKind, TransitionTable};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use tracing::trace;

/// Label of a λ-NFA transition.
///
/// Inputs fed to the automaton are plain `I` values, so `Lambda` can never
/// occur in an input sequence. Serializes as `Option<I>` with `null` for λ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
	from = "Option<I>",
	into = "Option<I>",
	bound(
		serialize = "I: Clone + Serialize",
		deserialize = "I: Deserialize<'de>"
	)
)]
pub enum Label<I> {
	/// Empty transition, taken without consuming input.
	Lambda,
	/// Transition consuming one input.
	Input(I),
}

impl<I> Label<I> {
	/// Checks whether this is an empty transition.
	pub fn is_lambda(&self) -> bool {
		matches!(self, Self::Lambda)
	}
}

impl<I> From<Option<I>> for Label<I> {
	fn from(input: Option<I>) -> Self {
		match input {
			Some(input) => Self::Input(input),
			None => Self::Lambda,
		}
	}
}

impl<I> From<Label<I>> for Option<I> {
	fn from(label: Label<I>) -> Self {
		match label {
			Label::Input(input) => Some(input),
			Label::Lambda => None,
		}
	}
}

/// Starting configuration of a λ-NFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartClosure {
	/// The λ-closure of the starting state.
	Closed,

	/// The starting state alone. λ-transitions out of it only take effect
	/// after the first consuming step has closed over them.
	Bare,
}

impl Default for StartClosure {
	fn default() -> Self {
		Self::Closed
	}
}

/// A non-deterministic finite state automaton with λ-transitions.
#[derive(Debug, Clone)]
pub struct LambdaNFA<S, I> {
	table: TransitionTable<S, Label<I>>,
	current: BTreeSet<S>,
	aborted: bool,
	stepped: bool,
	start_closure: StartClosure,
}

impl<S, I> Default for LambdaNFA<S, I> {
	fn default() -> Self {
		Self {
			table: TransitionTable::default(),
			current: BTreeSet::new(),
			aborted: false,
			stepped: false,
			start_closure: StartClosure::default(),
		}
	}
}

impl<S, I> LambdaNFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: PartialEq + fmt::Debug,
{
	/// Creates a new empty λ-NFA with the given starting configuration policy.
	pub fn with_start_closure(start_closure: StartClosure) -> Self {
		Self {
			start_closure,
			..Self::default()
		}
	}

	/// Gets the starting configuration policy.
	pub fn start_closure(&self) -> StartClosure {
		self.start_closure
	}

	/// Changes the starting configuration policy.
	/// Takes effect on the next reset, or immediately if nothing was consumed yet.
	pub fn set_start_closure(&mut self, start_closure: StartClosure) {
		self.start_closure = start_closure;
		self.reinitialize();
	}

	/// Gets the set of current states.
	/// Empty if no starting state was registered.
	pub fn current(&self) -> &BTreeSet<S> {
		&self.current
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
	pub fn transitions_from(&self, id: &S) -> &[(Label<I>, S)] {
		self.table.transitions_from(id)
	}

	/// Returns every state reachable from `id` over zero or more λ-transitions.
	pub fn lambda_closure(&self, id: &S) -> BTreeSet<S> {
		self.close(Some(id.clone()))
	}

	/// Closes a set of seed states under λ-transitions.
	/// Each state is expanded at most once, so λ-cycles terminate.
	fn close<T>(&self, seeds: T) -> BTreeSet<S>
	where
		T: IntoIterator<Item = S>,
	{
		let mut closure = BTreeSet::new();
		let mut pending = Vec::new();
		for seed in seeds {
			if closure.insert(seed.clone()) {
				pending.push(seed);
			}
		}
		while let Some(state) = pending.pop() {
			for (on, to) in self.table.transitions_from(&state) {
				if on.is_lambda() && closure.insert(to.clone()) {
					pending.push(to.clone());
				}
			}
		}
		closure
	}

	fn start_configuration(&self) -> BTreeSet<S> {
		match (self.table.starting_state(), self.start_closure) {
			(None, _) => BTreeSet::new(),
			(Some(start), StartClosure::Closed) => self.close(Some(start.clone())),
			(Some(start), StartClosure::Bare) => {
				let mut current = BTreeSet::new();
				current.insert(start.clone());
				current
			}
		}
	}

	/// Recomputes the starting configuration while the build phase may still
	/// change it.
	fn reinitialize(&mut self) {
		if !self.stepped {
			self.current = self.start_configuration();
		}
	}
}

impl<S, I> Automaton<I> for LambdaNFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: PartialEq + fmt::Debug,
{
	type State = S;
	type Symbol = Label<I>;

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

	fn add_transition(&mut self, from: S, on: Label<I>, to: S) -> Result<(), BuildError<S>> {
		let lambda = on.is_lambda();
		self.table.add_transition(from, on, to)?;
		if lambda {
			self.reinitialize();
		}
		Ok(())
	}

	fn step(&mut self, input: &I) {
		self.stepped = true;
		if self.aborted {
			return;
		}
		let targets = self
			.current
			.iter()
			.flat_map(|state| self.table.transitions_from(state))
			.filter(|(on, _)| matches!(on, Label::Input(on) if on == input))
			.map(|(_, to)| to.clone())
			.collect::<Vec<_>>();
		let next = self.close(targets);

		if next.is_empty() {
			trace!(from = ?self.current, ?input, "nfa has no transition");
			self.aborted = true;
		} else {
			trace!(from = ?self.current, ?input, to = ?next, "nfa step");
			self.current = next;
		}
	}

	fn has_aborted(&self) -> bool {
		self.aborted
	}

	fn is_accepting(&self) -> bool {
		self.current
			.iter()
			.any(|state| self.table.is_accepting(state))
	}

	fn reset(&mut self) {
		self.current = self.start_configuration();
		self.aborted = false;
		self.stepped = false;
	}
}
