use std::fmt;
use thiserror::Error;

/// Reason a build-phase mutation was rejected.
///
/// The automaton is left exactly as it was before the rejected call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError<S>
where
	S: fmt::Debug,
{
	/// The state was already registered.
	#[error("State {0:?} already in automaton")]
	DuplicateState(S),

	/// A transition endpoint was never registered.
	#[error("Inexistent State ID {0:?}")]
	InexistentState(S),
}

impl<S> BuildError<S>
where
	S: fmt::Debug,
{
	/// Returns the state the rejection refers to.
	pub fn state(&self) -> &S {
		match self {
			Self::DuplicateState(state) | Self::InexistentState(state) => state,
		}
	}
}
