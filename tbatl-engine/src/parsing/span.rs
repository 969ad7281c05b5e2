use std::cmp::{max, min};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Range};

/// A [Span] describes the byte range of a slice of formula text.
/// Tokens carry one so that parse errors can point at the offending input.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(begin: usize, end: usize) -> Self {
        Span { begin, end }
    }

    /// A zero-width span at the given position, e.g. for "unexpected end of input".
    pub const fn at(pos: usize) -> Self {
        Span::new(pos, pos)
    }

    /// Smallest span covering both `self` and `other`. The + operator does the same.
    pub fn merge(&self, other: Span) -> Span {
        Span {
            begin: min(self.begin, other.begin),
            end: max(self.end, other.end),
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.begin, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl Add for Span {
    type Output = Span;

    fn add(self, rhs: Self) -> Self::Output {
        self.merge(rhs)
    }
}
