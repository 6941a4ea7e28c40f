//! Parse errors (spec.md §7 "Parse error" / "Pattern/expression context error").
//!
//! There is no recovery (spec.md §1 Non-goals: "No recovery from syntax
//! errors"), so a `Parser` stops at the first `ParseError` rather than
//! accumulating a `Vec` of them the way `dlc_util::Handler` does for
//! warnings — matching `original_source/di_parser.c`'s `error()`, which
//! calls `di_error` and never returns.

use dlc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected {found}")]
    UnexpectedToken { found: String, span: Span },

    #[error("Unexpected {found}, expected {expected}")]
    ExpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("Unexpected end of input")]
    UnexpectedEof { span: Span },

    #[error("Function '{name}' has clauses of arity {first_arity} and {arity}")]
    ArityMismatch {
        name: String,
        first_arity: usize,
        arity: usize,
        span: Span,
    },

    #[error("Invalid {context}: {reason}")]
    InvalidContext {
        context: &'static str,
        reason: String,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::ExpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::ArityMismatch { span, .. } => *span,
            ParseError::InvalidContext { span, .. } => *span,
        }
    }
}
