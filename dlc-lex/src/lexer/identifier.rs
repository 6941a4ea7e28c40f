//! Word lexing: keywords, `true`/`false`/`null` literals, and identifiers.
//!
//! Grammar: `[letter_or_$][word_or_$]*` (spec.md §4.1 item 6) — this
//! language's identifiers may start with `$`, a holdover from the original's
//! word_re (`original_source/di_lexer.c`: `"[[:alpha:]$][\\w$]*"`).

use crate::cursor::Cursor;
use crate::token::TokenKind;
use crate::unicode::{is_ident_continue, is_ident_start};
use dlc_util::Symbol;
use dlc_value::Value;

pub fn is_word_start(c: char) -> bool {
    c == '$' || is_ident_start(c)
}

pub(crate) fn is_word_continue(c: char) -> bool {
    c == '$' || is_ident_continue(c)
}

/// Consumes a word starting at the cursor and classifies it as a keyword,
/// a `true`/`false`/`null` literal, or a plain identifier.
pub fn lex_word(cursor: &mut Cursor<'_>) -> TokenKind {
    let start = cursor.position();
    cursor.advance();
    while !cursor.is_at_end() && is_word_continue(cursor.current_char()) {
        cursor.advance();
    }
    let word = cursor.slice_from(start);

    match word {
        "case" => TokenKind::Case,
        "of" => TokenKind::Of,
        "let" => TokenKind::Let,
        "in" => TokenKind::In,
        "do" => TokenKind::Do,
        "end" => TokenKind::End,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "mod" => TokenKind::Mod,
        "where" => TokenKind::Where,
        "true" => TokenKind::Lit(Value::Bool(true)),
        "false" => TokenKind::Lit(Value::Bool(false)),
        "null" => TokenKind::Lit(Value::Null),
        _ => TokenKind::Ident(Symbol::intern(word)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_keywords() {
        let mut c = Cursor::new("case");
        assert_eq!(lex_word(&mut c), TokenKind::Case);
    }

    #[test]
    fn lexes_where_even_though_it_is_missing_from_the_prose_keyword_list() {
        let mut c = Cursor::new("where");
        assert_eq!(lex_word(&mut c), TokenKind::Where);
    }

    #[test]
    fn lexes_boolean_and_null_literals() {
        let mut c = Cursor::new("true");
        assert_eq!(lex_word(&mut c), TokenKind::Lit(Value::Bool(true)));
        let mut c = Cursor::new("null");
        assert_eq!(lex_word(&mut c), TokenKind::Lit(Value::Null));
    }

    #[test]
    fn lexes_plain_identifier() {
        let mut c = Cursor::new("frobnicate");
        assert_eq!(lex_word(&mut c), TokenKind::Ident(Symbol::intern("frobnicate")));
    }

    #[test]
    fn identifier_may_contain_dollar_sign() {
        let mut c = Cursor::new("$scope");
        assert_eq!(lex_word(&mut c), TokenKind::Ident(Symbol::intern("$scope")));
    }
}
