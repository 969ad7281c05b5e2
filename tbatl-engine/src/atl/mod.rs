use std::cmp::max;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub use crate::atl::coalition::Coalition;
use crate::game_structure::Proposition;

mod coalition;

/// Alternating-time Temporal Logic formula over a turn-based game.
///
/// "Eventually" has no variant of its own: [Phi::eventually] builds the equivalent
/// `Until` with a `true` left-hand side. Equality is structural.
#[derive(Hash, Eq, PartialEq, Clone, Debug, Deserialize, Serialize)]
pub enum Phi {
    /// Trivially satisfied
    #[serde(rename = "true")]
    True,
    /// Trivially not satisfied
    #[serde(rename = "false")]
    False,
    /// The current state must have the label/proposition
    #[serde(rename = "proposition")]
    Proposition(Proposition),
    /// It must not be the case that subformula is satisfied
    #[serde(rename = "not")]
    Not(Arc<Phi>),
    /// It must be the case that either formula is satisfied
    #[serde(rename = "or")]
    Or(Arc<Phi>, Arc<Phi>),
    /// It must be the case that both formulae are satisfied
    #[serde(rename = "and")]
    And(Arc<Phi>, Arc<Phi>),
    /// If the first formula is satisfied, the second must be too
    #[serde(rename = "implies")]
    Implies(Arc<Phi>, Arc<Phi>),
    /// `players` can ensure that `formula` holds in the next state
    #[serde(rename = "next")]
    Next {
        players: Coalition,
        formula: Arc<Phi>,
    },
    /// `players` can ensure that `formula` keeps holding from the next state on
    #[serde(rename = "invariant")]
    Invariant {
        players: Coalition,
        formula: Arc<Phi>,
    },
    /// `players` can ensure that a state satisfying `until` is reached.
    /// `pre` is carried along but is not checked on the way.
    #[serde(rename = "until")]
    Until {
        players: Coalition,
        pre: Arc<Phi>,
        until: Arc<Phi>,
    },
    /// `players` cannot be kept from reaching a state where `formula` holds.
    /// Checked as `~{players}[](~formula)`.
    #[serde(rename = "avoid")]
    Avoid {
        players: Coalition,
        formula: Arc<Phi>,
    },
}

impl Phi {
    pub fn constant(value: bool) -> Phi {
        if value {
            Phi::True
        } else {
            Phi::False
        }
    }

    pub fn proposition(name: impl Into<Proposition>) -> Phi {
        Phi::Proposition(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(formula: Phi) -> Phi {
        Phi::Not(Arc::new(formula))
    }

    pub fn and(lhs: Phi, rhs: Phi) -> Phi {
        Phi::And(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn or(lhs: Phi, rhs: Phi) -> Phi {
        Phi::Or(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn implies(lhs: Phi, rhs: Phi) -> Phi {
        Phi::Implies(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn next(players: Coalition, formula: Phi) -> Phi {
        Phi::Next {
            players,
            formula: Arc::new(formula),
        }
    }

    pub fn invariant(players: Coalition, formula: Phi) -> Phi {
        Phi::Invariant {
            players,
            formula: Arc::new(formula),
        }
    }

    pub fn until(players: Coalition, pre: Phi, until: Phi) -> Phi {
        Phi::Until {
            players,
            pre: Arc::new(pre),
            until: Arc::new(until),
        }
    }

    /// `{players}<>(formula)`, which is `{players}(true) U (formula)`.
    pub fn eventually(players: Coalition, formula: Phi) -> Phi {
        Phi::until(players, Phi::True, formula)
    }

    pub fn avoid(players: Coalition, formula: Phi) -> Phi {
        Phi::Avoid {
            players,
            formula: Arc::new(formula),
        }
    }

    /// Returns true if this is an `Until` whose left-hand side is `true`,
    /// i.e. the eventually operator.
    pub fn is_eventually(&self) -> bool {
        matches!(self, Phi::Until { pre, .. } if **pre == Phi::True)
    }

    /// Returns the size of the formula. This is equivalent to the number of nodes in the
    /// phi structure
    pub fn size(&self) -> u32 {
        match self {
            Phi::True | Phi::False | Phi::Proposition(_) => 1,
            Phi::Not(formula) => formula.size() + 1,
            Phi::Or(lhs, rhs) | Phi::And(lhs, rhs) | Phi::Implies(lhs, rhs) => {
                lhs.size() + rhs.size() + 1
            }
            Phi::Next { formula, .. }
            | Phi::Invariant { formula, .. }
            | Phi::Avoid { formula, .. } => formula.size() + 1,
            Phi::Until { pre, until, .. } => pre.size() + until.size() + 1,
        }
    }

    /// Returns the depth of the formula. This is equivalent to the longest branch in the
    /// phi structure
    pub fn depth(&self) -> u32 {
        match self {
            Phi::True | Phi::False | Phi::Proposition(_) => 1,
            Phi::Not(formula) => formula.depth() + 1,
            Phi::Or(lhs, rhs) | Phi::And(lhs, rhs) | Phi::Implies(lhs, rhs) => {
                max(lhs.depth(), rhs.depth()) + 1
            }
            Phi::Next { formula, .. }
            | Phi::Invariant { formula, .. }
            | Phi::Avoid { formula, .. } => formula.depth() + 1,
            Phi::Until { pre, until, .. } => max(pre.depth(), until.depth()) + 1,
        }
    }

    /// Returns the number of path qualifiers in the formula. E.g.
    /// * `(p ^ q)` returns 0
    /// * `{t}<>(s)` returns 1
    /// * `({t}<>(s) V {c}<>(u))` returns 2
    /// * `{0}[](oog -> {c}[](oog))` returns 2
    pub fn path_qualifier_count(&self) -> u32 {
        match self {
            Phi::True | Phi::False | Phi::Proposition(_) => 0,
            Phi::Not(formula) => formula.path_qualifier_count(),
            Phi::Or(lhs, rhs) | Phi::And(lhs, rhs) | Phi::Implies(lhs, rhs) => {
                lhs.path_qualifier_count() + rhs.path_qualifier_count()
            }
            Phi::Next { formula, .. }
            | Phi::Invariant { formula, .. }
            | Phi::Avoid { formula, .. } => formula.path_qualifier_count() + 1,
            Phi::Until { pre, until, .. } => {
                pre.path_qualifier_count() + until.path_qualifier_count() + 1
            }
        }
    }
}

/// Renders a temporal operand, adding parentheses unless the rendering already starts with one.
struct Operand<'a>(&'a Phi);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self.0.to_string();
        if text.starts_with('(') {
            write!(f, "{}", text)
        } else {
            write!(f, "({})", text)
        }
    }
}

impl Display for Phi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phi::True => write!(f, "true"),
            Phi::False => write!(f, "false"),
            Phi::Proposition(name) => write!(f, "{}", name),
            Phi::Not(formula) => write!(f, "~{}", formula),
            Phi::Or(lhs, rhs) => write!(f, "({} V {})", lhs, rhs),
            Phi::And(lhs, rhs) => write!(f, "({} ^ {})", lhs, rhs),
            Phi::Implies(lhs, rhs) => write!(f, "({} -> {})", lhs, rhs),
            Phi::Next { players, formula } => write!(f, "{}@{}", players, Operand(formula)),
            Phi::Invariant { players, formula } => {
                write!(f, "{}[]{}", players, Operand(formula))
            }
            Phi::Until {
                players,
                pre,
                until,
            } => {
                if self.is_eventually() {
                    write!(f, "{}<>{}", players, Operand(until))
                } else {
                    write!(f, "{}{} U {}", players, Operand(pre), Operand(until))
                }
            }
            Phi::Avoid { players, formula } => write!(
                f,
                "~{}[]{}",
                players,
                Operand(&Phi::Not(formula.clone()))
            ),
        }
    }
}
