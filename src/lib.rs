//! Deterministic and λ-non-deterministic finite automata answering membership
//! queries over input sequences.

mod automaton;
mod definition;
mod dfa;
mod error;
mod nfa;
mod table;

pub use automaton::{accepts, Automaton, StateKind};
pub use definition::Definition;
pub use dfa::DFA;
pub use error::BuildError;
pub use nfa::{Label, LambdaNFA, StartClosure};
pub use table::TransitionTable;
