//! Errors the annotator can raise (spec.md §4.3, §7).
//!
//! Like `dlc-lex::LexError` and `dlc-par::ParseError`, every variant carries
//! the [`Span`] of the offending use site so the CLI can print `L:C: MSG`
//! without re-walking the tree. There is no recovery: `annotate` returns on
//! the first error (`original_source/di_annotate.c`'s `error()` longjmps out
//! of the whole pass the same way).

use dlc_util::{Span, Symbol};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemError {
    /// A `var` in expression position whose name is not visible in any
    /// enclosing scope, or a function's transitively-closed environment
    /// referencing a variable not yet bound at the call site (spec.md
    /// scenario 7: `g(); x = 1` fails here, not inside `g`'s body).
    #[error("Undefined variable {name}")]
    UndefinedVariable { name: Symbol, span: Span },

    /// A pattern-position `var` whose name already denotes a function in an
    /// enclosing scope (spec.md §4.3 pass 1: "if name refers to a function,
    /// error").
    #[error("Can't pattern-match on function {name}")]
    PatternMatchOnFunction { name: Symbol, span: Span },
}

impl SemError {
    pub fn span(&self) -> Span {
        match self {
            SemError::UndefinedVariable { span, .. } => *span,
            SemError::PatternMatchOnFunction { span, .. } => *span,
        }
    }
}
