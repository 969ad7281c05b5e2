use std::cell::Cell;

use crate::algorithms::error::CheckError;
use crate::algorithms::marking::{Marker, Marking};
use crate::atl::{Coalition, Phi};
use crate::game_structure::{GameStructure, StateIdx};

/// Default bound on the recursion depth of a single check.
pub const DEFAULT_DEPTH_LIMIT: usize = 10_000;

/// Checks ATL formulae in single states of a turn-based game by recursing over
/// the transition graph.
///
/// `Next` lets the coalition pick a successor in states it controls and requires
/// all successors otherwise. `Invariant` and `Until` are evaluated as fixpoints:
/// reaching a state that any fixpoint on the current path is working on closes a
/// cycle, which an `Invariant` accepts and an `Until` rejects. Nested fixpoints
/// share the marks, so an inner `Until` fails at a state an outer `Invariant` has
/// in progress. The checker holds no mutable state, every check gets a fresh
/// [Marking].
#[derive(Debug)]
pub struct ModelChecker<'a, G: GameStructure> {
    game: &'a G,
    depth_limit: usize,
}

impl<'a, G: GameStructure> ModelChecker<'a, G> {
    pub fn new(game: &'a G) -> Self {
        ModelChecker {
            game,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Fail with [CheckError::DepthLimitExceeded] instead of recursing deeper than `limit`.
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    pub fn game(&self) -> &'a G {
        self.game
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Returns whether `formula` holds in `state`.
    /// Runs on the calling thread, whose stack must fit the depth limit. See
    /// [ModelChecker::check_all_parallel] for checks on sized worker threads.
    pub fn check(&self, formula: &Phi, state: StateIdx) -> Result<bool, CheckError> {
        self.check_with(formula, state, &Marking::new())
    }

    /// Like [ModelChecker::check], using the given marking for cycle detection.
    /// The marking must be clean before the call and is clean again afterwards.
    pub fn check_with(
        &self,
        formula: &Phi,
        state: StateIdx,
        marking: &Marking,
    ) -> Result<bool, CheckError> {
        if state.0 >= self.game.state_count() {
            return Err(CheckError::UnknownState(state));
        }
        if let Some(dirty) = marking.first_in_progress() {
            return Err(CheckError::DirtyMarking { state: dirty });
        }

        let frame = Frame {
            marking,
            depth: Cell::new(0),
            limit: self.depth_limit,
        };
        let result = self.eval(formula, state, &frame);

        if let Some(dirty) = marking.first_in_progress() {
            return Err(CheckError::DirtyMarking { state: dirty });
        }
        debug!(%formula, state = %self.game.state_name(state), ?result, "checked formula");
        result
    }

    /// Checks `formula` in each of `states`, one result per state in the same order.
    pub fn check_all(&self, formula: &Phi, states: &[StateIdx]) -> Result<Vec<bool>, CheckError> {
        states
            .iter()
            .map(|&state| self.check(formula, state))
            .collect()
    }

    /// Returns whether `formula` holds in every state of the game.
    pub fn is_valid(&self, formula: &Phi) -> Result<bool, CheckError> {
        for state in self.game.states() {
            if !self.check(formula, state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn eval(&self, formula: &Phi, state: StateIdx, frame: &Frame) -> Result<bool, CheckError> {
        let _depth = frame.descend()?;
        match formula {
            Phi::True => Ok(true),
            Phi::False => Ok(false),
            Phi::Proposition(name) => Ok(self.game.has_label(state, name)),
            Phi::Not(inner) => Ok(!self.eval(inner, state, frame)?),
            Phi::Or(lhs, rhs) => Ok(self.eval(lhs, state, frame)? || self.eval(rhs, state, frame)?),
            Phi::And(lhs, rhs) => {
                Ok(self.eval(lhs, state, frame)? && self.eval(rhs, state, frame)?)
            }
            Phi::Implies(lhs, rhs) => {
                Ok(!self.eval(lhs, state, frame)? || self.eval(rhs, state, frame)?)
            }
            Phi::Next { players, formula } => self.over_successors(players, state, |succ| {
                self.eval(formula, succ, frame)
            }),
            Phi::Invariant { players, formula } => self.invariant(players, formula, state, frame),
            Phi::Until { players, until, .. } => self.until(players, until, state, frame),
            Phi::Avoid {
                players,
                formula: inner,
            } => {
                let rewritten = Phi::not(Phi::invariant(
                    players.clone(),
                    Phi::Not(inner.clone()),
                ));
                self.eval(&rewritten, state, frame)
            }
        }
    }

    /// Evaluates `{players}[](formula)` in `state`.
    fn invariant(
        &self,
        players: &Coalition,
        formula: &Phi,
        state: StateIdx,
        frame: &Frame,
    ) -> Result<bool, CheckError> {
        if frame.marking.marker(state) == Marker::InProgress {
            trace!(%state, "invariant closes a cycle");
            return Ok(true);
        }
        let _depth = frame.descend()?;
        let _mark = frame.marking.enter(state);
        self.over_successors(players, state, |succ| {
            Ok(self.invariant(players, formula, succ, frame)?
                && self.eval(formula, succ, frame)?)
        })
    }

    /// Evaluates `{players}(_) U (until)` in `state`.
    /// Only reaching `until` matters, the left-hand side is not checked on the way.
    fn until(
        &self,
        players: &Coalition,
        until: &Phi,
        state: StateIdx,
        frame: &Frame,
    ) -> Result<bool, CheckError> {
        if self.eval(until, state, frame)? {
            return Ok(true);
        }
        if frame.marking.marker(state) == Marker::InProgress {
            trace!(%state, "until closes a cycle without reaching its goal");
            return Ok(false);
        }
        let _depth = frame.descend()?;
        let _mark = frame.marking.enter(state);
        self.over_successors(players, state, |succ| {
            self.until(players, until, succ, frame)
        })
    }

    /// Combines `holds` over the successors of `state`. If the coalition controls
    /// the state it may pick any successor, otherwise every successor must satisfy it.
    fn over_successors<F>(
        &self,
        players: &Coalition,
        state: StateIdx,
        mut holds: F,
    ) -> Result<bool, CheckError>
    where
        F: FnMut(StateIdx) -> Result<bool, CheckError>,
    {
        let coalition_moves = players.contains(self.game.controller(state));
        for &succ in self.game.successors(state) {
            if holds(succ)? == coalition_moves {
                return Ok(coalition_moves);
            }
        }
        Ok(!coalition_moves)
    }
}

/// Per-check recursion context.
struct Frame<'m> {
    marking: &'m Marking,
    depth: Cell<usize>,
    limit: usize,
}

impl Frame<'_> {
    fn descend(&self) -> Result<DepthGuard<'_>, CheckError> {
        let depth = self.depth.get() + 1;
        if depth > self.limit {
            return Err(CheckError::DepthLimitExceeded { limit: self.limit });
        }
        self.depth.set(depth);
        Ok(DepthGuard(&self.depth))
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::error::CheckError;
    use crate::algorithms::local::ModelChecker;
    use crate::atl::{Coalition, Phi};
    use crate::game_structure::{GameBuilder, StateIdx, TurnBasedGame};

    /// A chain s0 -> s1 -> ... -> s(n-1) with a self-loop at the end, goal only at the end.
    fn chain(n: usize) -> TurnBasedGame {
        let mut builder = GameBuilder::new();
        let states: Vec<StateIdx> = (0..n)
            .map(|i| {
                let labels = if i == n - 1 { vec!["goal"] } else { vec![] };
                builder.add_state(format!("s{}", i), labels, "a")
            })
            .collect();
        for pair in states.windows(2) {
            builder.connect(pair[0], &[pair[1]]);
        }
        builder.connect(states[n - 1], &[states[n - 1]]);
        builder.build().unwrap()
    }

    #[test]
    fn depth_limit_001() {
        let game = chain(50);
        let formula = Phi::eventually(Coalition::empty(), Phi::proposition("goal"));
        let checker = ModelChecker::new(&game);
        assert_eq!(checker.check(&formula, StateIdx(0)), Ok(true));

        let checker = ModelChecker::new(&game).with_depth_limit(20);
        assert_eq!(
            checker.check(&formula, StateIdx(0)),
            Err(CheckError::DepthLimitExceeded { limit: 20 })
        );
        // The failed check left nothing behind
        assert_eq!(checker.check(&formula, StateIdx(45)), Ok(true));
    }

    #[test]
    fn unknown_state_001() {
        let game = chain(2);
        let checker = ModelChecker::new(&game);
        assert_eq!(
            checker.check(&Phi::True, StateIdx(2)),
            Err(CheckError::UnknownState(StateIdx(2)))
        );
    }

    #[test]
    fn avoid_001() {
        // Nobody can keep the chain from reaching the goal
        let game = chain(4);
        let checker = ModelChecker::new(&game);
        let avoid = Phi::avoid(Coalition::new(["a"]), Phi::proposition("goal"));
        assert_eq!(checker.check(&avoid, StateIdx(0)), Ok(true));
        let rewritten = Phi::not(Phi::invariant(
            Coalition::new(["a"]),
            Phi::not(Phi::proposition("goal")),
        ));
        for state in [0, 1, 2, 3].map(StateIdx) {
            assert_eq!(checker.check(&avoid, state), checker.check(&rewritten, state));
        }
    }
}
