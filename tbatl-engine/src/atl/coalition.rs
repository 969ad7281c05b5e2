use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use joinery::prelude::*;

use crate::game_structure::Player;

/// The set of players a path quantifier talks about.
/// `{}` and `{0}` both denote the empty coalition. Players are kept sorted,
/// so two coalitions are equal iff they hold the same players and they always
/// render the same way.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Coalition(BTreeSet<Player>);

impl Coalition {
    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Player>,
    {
        Coalition(players.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        Coalition(BTreeSet::new())
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0.contains(player)
    }
}

impl<P: Into<Player>> FromIterator<P> for Coalition {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Coalition::new(iter)
    }
}

impl Display for Coalition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "{{0}}")
        } else {
            write!(f, "{{{}}}", self.0.iter().join_with(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::atl::Coalition;

    #[test]
    fn coalition_display_001() {
        assert_eq!(Coalition::empty().to_string(), "{0}");
        assert_eq!(Coalition::new(["t", "c"]).to_string(), "{c,t}");
    }

    #[test]
    fn coalition_eq_001() {
        // Order and repetition of players does not matter
        assert_eq!(Coalition::new(["t", "c", "t"]), Coalition::new(["c", "t"]));
        assert_ne!(Coalition::new(["c"]), Coalition::new(["c", "t"]));
        assert_eq!(Coalition::new(Vec::<String>::new()), Coalition::empty());
    }
}
