use std::cell::RefCell;
use std::collections::HashSet;

use crate::game_structure::StateIdx;

/// Traversal state of a game state during one check.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Marker {
    Unvisited,
    /// Some `Invariant` or `Until` is being evaluated in the state further up the
    /// current recursion path.
    InProgress,
}

/// The states whose fixpoint evaluation is in progress.
///
/// A marking belongs to a single top-level check and is shared by every
/// `Invariant` and `Until` in the formula, so a nested fixpoint reaching a state
/// an outer one is working on closes the cycle there. Marks are only set through
/// [Marking::enter], whose guard clears the mark again when dropped, so a
/// marking is clean again once the check returns, also when it returns early
/// with an error.
#[derive(Debug, Default)]
pub struct Marking {
    in_progress: RefCell<HashSet<StateIdx>>,
}

impl Marking {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn marker(&self, state: StateIdx) -> Marker {
        if self.in_progress.borrow().contains(&state) {
            Marker::InProgress
        } else {
            Marker::Unvisited
        }
    }

    /// Marks `state` as in progress until the returned guard is dropped.
    pub fn enter(&self, state: StateIdx) -> MarkGuard<'_> {
        let fresh = self.in_progress.borrow_mut().insert(state);
        debug_assert!(fresh, "state {} entered while in progress", state);
        MarkGuard {
            marking: self,
            state,
        }
    }

    /// True if every state is unvisited.
    pub fn is_clean(&self) -> bool {
        self.in_progress.borrow().is_empty()
    }

    /// Some state that is still marked, if any.
    pub fn first_in_progress(&self) -> Option<StateIdx> {
        self.in_progress.borrow().iter().min().copied()
    }
}

/// Clears a mark set by [Marking::enter] when dropped.
#[must_use = "the mark is cleared as soon as the guard is dropped"]
pub struct MarkGuard<'a> {
    marking: &'a Marking,
    state: StateIdx,
}

impl Drop for MarkGuard<'_> {
    fn drop(&mut self) {
        self.marking.in_progress.borrow_mut().remove(&self.state);
    }
}
