use dlc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("{span}: unexpected character {found:?}")]
    UnexpectedChar { found: char, span: Span },

    #[error("{span}: unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("{span}: unterminated regex literal")]
    UnterminatedRegex { span: Span },

    #[error("{span}: invalid number literal {text:?}")]
    InvalidNumber { text: String, span: Span },

    #[error("{span}: invalid string literal: {reason}")]
    InvalidString { reason: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span, .. }
            | LexError::UnterminatedRegex { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::InvalidString { span, .. } => *span,
        }
    }
}
