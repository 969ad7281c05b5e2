use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::game_structure::StateIdx;

/// Error produced when a formula cannot be checked in a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The state does not belong to the game
    UnknownState(StateIdx),
    /// The recursion got deeper than the configured limit
    DepthLimitExceeded { limit: usize },
    /// A marking still had a state in progress outside of a running check
    DirtyMarking { state: StateIdx },
    /// A worker thread for a parallel check could not be started
    WorkerSpawn(String),
}

impl Display for CheckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckError::UnknownState(state) => {
                write!(f, "State {} does not exist in the game", state)
            }
            CheckError::DepthLimitExceeded { limit } => write!(
                f,
                "Evaluation exceeded the recursion depth limit of {}",
                limit
            ),
            CheckError::DirtyMarking { state } => write!(
                f,
                "State {} is still marked as in progress outside of a running check",
                state
            ),
            CheckError::WorkerSpawn(reason) => {
                write!(f, "Failed to start a worker thread. {}", reason)
            }
        }
    }
}

impl Error for CheckError {}
