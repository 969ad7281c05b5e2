use crate::atl::Phi;
use crate::game_structure::{GameStructure, StateIdx};

pub use error::CheckError;
pub use local::{ModelChecker, DEFAULT_DEPTH_LIMIT};
pub use marking::{MarkGuard, Marker, Marking};

mod error;
pub mod local;
pub mod marking;
mod parallel;

/// Returns whether `formula` holds in `state` of `game`.
pub fn evaluate<G: GameStructure>(
    game: &G,
    formula: &Phi,
    state: StateIdx,
) -> Result<bool, CheckError> {
    ModelChecker::new(game).check(formula, state)
}

/// Evaluates `formula` once per state, reporting each result without aggregating them.
pub fn evaluate_over_set<G: GameStructure>(
    game: &G,
    formula: &Phi,
    states: &[StateIdx],
) -> Result<Vec<bool>, CheckError> {
    ModelChecker::new(game).check_all(formula, states)
}
