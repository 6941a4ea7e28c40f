//! Source location tracking.
//!
//! The lexer and parser only ever need to report *where* a token or node
//! starts, never a byte range: every diagnostic in the pipeline is phrased
//! as "line L, column C" (see `original_source/di_parser.c`'s `error()`).
//! `Span` is therefore a single point, not a start/end pair — there is no
//! multi-file source map either, since the compiler only ever processes one
//! source file per invocation (spec.md §6, "one file per invocation").

use std::fmt;

/// A 1-based line/column position in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// A placeholder span for synthesized nodes that have no real source
    /// location (e.g. a `NodeId` created purely for bookkeeping).
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    #[inline]
    pub const fn is_dummy(self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::DUMMY
    }
}
