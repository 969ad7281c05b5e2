use std::fmt::{Display, Formatter};
use std::ops::Deref;

pub use turn_based::{GameBuilder, GameError, State, TurnBasedGame};

mod turn_based;

/// Name of an atomic proposition.
pub type Proposition = String;
/// Name of a player.
pub type Player = String;

/// Define an index type using the new-type pattern.
/// The type can seamlessly be dereferenced to the underlying type.
macro_rules! index_type {
    ($name:ident, $typ:ty) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize)]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(pub $typ);

        impl Deref for $name {
            type Target = $typ;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

index_type!(StateIdx, usize);

/// A turn-based game graph: every state is controlled by exactly one player,
/// who picks which outgoing transition is taken.
pub trait GameStructure {
    fn initial_state_index(&self) -> StateIdx;

    fn state_count(&self) -> usize;

    /// Whether `proposition` holds in `state`.
    fn has_label(&self, state: StateIdx, proposition: &str) -> bool;

    /// The player choosing the outgoing transition of `state`.
    fn controller(&self, state: StateIdx) -> &str;

    /// The states reachable from `state` in one step, in declaration order.
    fn successors(&self, state: StateIdx) -> &[StateIdx];

    /// Returns the human-readable name of the given state
    fn state_name(&self, state: StateIdx) -> String;

    /// All states of the game in index order.
    fn states(&self) -> Vec<StateIdx> {
        (0..self.state_count()).map(StateIdx).collect()
    }
}
