//! Source location spans.
//!
//! The parser reports positions as a line plus a column range, and the
//! front-end reports its diagnostics the same way.

use std::fmt;

/// Source location span: one line, a half-open column range.
///
/// Lines and columns are 1-based. `Span::DUMMY` (all zero) marks nodes with
/// no source position, such as symbols imported from compiled units.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    pub line: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl Span {
    /// Span for generated or imported entities.
    pub const DUMMY: Span = Span {
        line: 0,
        start_col: 0,
        end_col: 0,
    };

    /// Create a new span.
    #[inline]
    pub const fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Span {
            line,
            start_col,
            end_col,
        }
    }

    /// Width of the span in columns.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col)
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end_col <= self.start_col
    }

    /// Check whether this is the dummy span.
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.line == 0
    }

    /// Merge two spans on the same line. Spans on different lines keep the
    /// earlier one.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.line != other.line {
            return self.min(other);
        }
        Span {
            line: self.line,
            start_col: self.start_col.min(other.start_col),
            end_col: self.end_col.max(other.end_col),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.line, self.start_col, self.end_col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.start_col)
    }
}
