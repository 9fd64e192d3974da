use super::BuildError;
use std::{fmt, ops::BitOr};
use tracing::debug;

/// Role of a state when it is registered.
///
/// Flags compose with `|`, so `StateKind::Starting | StateKind::Accepting`
/// equals `StateKind::StartingAccepting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
	/// Neither starting nor accepting.
	None,
	/// The starting state.
	Starting,
	/// An accepting state.
	Accepting,
	/// Both starting and accepting.
	StartingAccepting,
}

impl StateKind {
	/// Creates a kind from its two flags.
	pub fn from_flags(starting: bool, accepting: bool) -> Self {
		match (starting, accepting) {
			(false, false) => Self::None,
			(true, false) => Self::Starting,
			(false, true) => Self::Accepting,
			(true, true) => Self::StartingAccepting,
		}
	}

	/// Checks whether the kind marks a starting state.
	pub fn is_starting(self) -> bool {
		matches!(self, Self::Starting | Self::StartingAccepting)
	}

	/// Checks whether the kind marks an accepting state.
	pub fn is_accepting(self) -> bool {
		matches!(self, Self::Accepting | Self::StartingAccepting)
	}
}

impl Default for StateKind {
	fn default() -> Self {
		Self::None
	}
}

impl BitOr for StateKind {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self::from_flags(
			self.is_starting() || rhs.is_starting(),
			self.is_accepting() || rhs.is_accepting(),
		)
	}
}

/// Trait representing an abstract automaton consuming inputs of type `I`.
///
/// Building happens through `add_state` and `add_transition`, simulation through
/// `step`, `has_aborted`, `is_accepting` and `reset`.
pub trait Automaton<I>
where
	Self: Default,
{
	/// State identifier type.
	type State: Clone + Ord + fmt::Debug;

	/// Label carried by a transition.
	type Symbol;

	/// Creates a new empty automaton.
	fn new() -> Self {
		Self::default()
	}

	/// Creates a new automaton with a given set of states & transitions.
	/// Stops at the first rejected state or transition.
	fn from_transitions<V, T>(states: V, transitions: T) -> Result<Self, BuildError<Self::State>>
	where
		V: IntoIterator<Item = (Self::State, StateKind)>,
		T: IntoIterator<Item = (Self::State, Self::Symbol, Self::State)>,
	{
		let mut automaton = Self::new();
		for (id, kind) in states {
			automaton.add_state(id, kind)?;
		}
		for (from, on, to) in transitions {
			automaton.add_transition(from, on, to)?;
		}
		Ok(automaton)
	}

	/// Checks whether the states of the automaton includes a state.
	fn has_state(&self, id: &Self::State) -> bool;

	/// Adds a new state to the automaton.
	/// Registering a starting state resets the automaton to it.
	fn add_state(&mut self, id: Self::State, kind: StateKind) -> Result<(), BuildError<Self::State>>;

	/// Adds a new transition to the automaton.
	/// Returns an `BuildError::InexistentState` error if one of the states is inexistent.
	fn add_transition(
		&mut self,
		from: Self::State,
		on: Self::Symbol,
		to: Self::State,
	) -> Result<(), BuildError<Self::State>>;

	/// Consumes a single input.
	fn step(&mut self, input: &I);

	/// Checks whether a step found no valid transition since the last reset.
	fn has_aborted(&self) -> bool;

	/// Checks whether the current configuration is accepting.
	fn is_accepting(&self) -> bool;

	/// Returns to the starting configuration and clears the abort flag.
	fn reset(&mut self);

	/// Runs the automaton on a sequence of inputs.
	/// This automatically resets the automaton after the execution.
	fn run<'a, V>(&mut self, inputs: V) -> bool
	where
		V: IntoIterator<Item = &'a I>,
		I: 'a,
	{
		let result = accepts(self, inputs);
		self.reset();
		result
	}
}

/// Feeds a sequence of inputs into an automaton and reports whether it accepts.
///
/// Stops at the first input that aborts the automaton. An empty sequence leaves
/// the automaton untouched. The automaton is not reset afterwards.
pub fn accepts<'a, A, I, V>(automaton: &mut A, inputs: V) -> bool
where
	A: Automaton<I>,
	V: IntoIterator<Item = &'a I>,
	I: 'a,
{
	for (position, input) in inputs.into_iter().enumerate() {
		automaton.step(input);
		if automaton.has_aborted() {
			debug!(position, "automaton aborted, input rejected");
			return false;
		}
	}
	automaton.is_accepting()
}
