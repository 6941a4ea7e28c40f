//! dlc-lex - the layout-aware lexer (spec.md §4.1).
//!
//! Splits into a character [`cursor`], a [`token`] vocabulary, Unicode
//! classification helpers, and one submodule per token class under
//! [`lexer`] (`operator`, `number`, `string`, `identifier`, `comment`) that
//! [`lexer::Lexer`] dispatches between, plus the layout stack that
//! synthesizes `;`/`in`/`end` from indentation.

mod cursor;
pub mod error;
mod lexer;
pub mod token;
mod unicode;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
