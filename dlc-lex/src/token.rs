//! Token kinds produced by the lexer.
//!
//! Rendered as a Rust enum rather than the source's `{op, data, line, column}`
//! dict (spec.md §9's "tagged variants rather than dicts" option) — one
//! variant per fixed operator/keyword, plus `Ident`/`Lit`/`Regex`/`Eof` for
//! the data-carrying categories.

use dlc_util::{Span, Symbol};
use dlc_value::Value;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(Symbol),
    Lit(Value),
    Regex(Rc<str>),

    // Keywords. `where` is not in spec.md §4.1 item 6's explicit keyword
    // list but is a layout-triggering keyword per the Layout section, so it
    // must lex the same way the others do.
    Case,
    Of,
    Let,
    In,
    Do,
    End,
    If,
    Then,
    Else,
    And,
    Or,
    Not,
    Mod,
    Where,

    // Multi-char operators.
    Arrow, // ->
    Le,    // <=
    Ge,    // >=
    EqEq,  // ==
    Ne,    // != / ≠

    // Single-char operators and punctuation.
    Lt,
    Gt,
    Comma,
    Colon,
    Semi,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    Tilde,
    At,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,

    Eof,
}

impl TokenKind {
    /// True for a token after which `/` means division rather than the
    /// start of a regex literal (spec.md §4.1 item 5, the lexer's one
    /// lookbehind).
    pub fn starts_division_context(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident(_) | TokenKind::Lit(_) | TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    pub fn is_semi(&self) -> bool {
        matches!(self, TokenKind::Semi)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Ident(sym) => return write!(f, "{sym}"),
            TokenKind::Lit(v) => return write!(f, "{}", dlc_value::pretty_print(v)),
            TokenKind::Regex(r) => return write!(f, "/{r}/"),
            TokenKind::Case => "case",
            TokenKind::Of => "of",
            TokenKind::Let => "let",
            TokenKind::In => "in",
            TokenKind::Do => "do",
            TokenKind::End => "end",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Mod => "mod",
            TokenKind::Where => "where",
            TokenKind::Arrow => "->",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::EqEq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semi => ";",
            TokenKind::Eq => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Tilde => "~",
            TokenKind::At => "@",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Eof => "eof",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
