use super::{Automaton, BuildError, StateKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Plain description of an automaton, as handed over by a loader.
///
/// `L` is the transition label: the input type for a [`DFA`](crate::DFA),
/// [`Label`](crate::Label) for a [`LambdaNFA`](crate::LambdaNFA).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	deny_unknown_fields,
	bound(deserialize = "S: Deserialize<'de>, L: Deserialize<'de>")
)]
pub struct Definition<S, L> {
	pub states: Vec<S>,
	pub starting: S,
	#[serde(default)]
	pub accepting: Vec<S>,
	#[serde(default)]
	pub transitions: Vec<(S, L, S)>,
}

impl<S, L> Definition<S, L>
where
	S: Clone + Ord + std::fmt::Debug,
{
	/// Builds an automaton from the definition.
	/// Returns the first rejected state or transition as an error.
	pub fn build<A, I>(self) -> Result<A, BuildError<S>>
	where
		A: Automaton<I, State = S, Symbol = L>,
	{
		let registered = self.states.iter().collect::<BTreeSet<_>>();
		if let Some(missing) = Some(&self.starting)
			.into_iter()
			.chain(&self.accepting)
			.find(|id| !registered.contains(id))
		{
			return Err(BuildError::InexistentState(missing.clone()));
		}

		let accepting = self.accepting.iter().collect::<BTreeSet<_>>();
		let kinds = self
			.states
			.iter()
			.map(|id| {
				let kind = StateKind::from_flags(*id == self.starting, accepting.contains(id));
				(id.clone(), kind)
			})
			.collect::<Vec<_>>();
		A::from_transitions(kinds, self.transitions)
	}
}
