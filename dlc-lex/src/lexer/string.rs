//! String literal lexing.
//!
//! Grammar (spec.md §4.1 item 4): `"…"` with JSON-style escapes `\" \\ \/
//! \b \f \n \r \t \uHHHH`. The lexer only has to find the matching closing
//! quote (respecting `\"` inside the literal); decoding the escapes is
//! delegated to `dlc_value::Value::decode_json_string`, which reuses
//! `serde_json`'s escape handling rather than re-implementing it (SPEC_FULL
//! §6).

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::TokenKind;
use dlc_util::Span;

pub fn lex_string(cursor: &mut Cursor<'_>, start_span: Span) -> Result<TokenKind, LexError> {
    let start = cursor.position();
    cursor.advance(); // opening quote

    loop {
        if cursor.is_at_end() || cursor.current_char() == '\n' {
            return Err(LexError::UnterminatedString { span: start_span });
        }
        match cursor.current_char() {
            '\\' => {
                cursor.advance();
                if cursor.is_at_end() {
                    return Err(LexError::UnterminatedString { span: start_span });
                }
                cursor.advance();
            }
            '"' => {
                cursor.advance();
                break;
            }
            _ => cursor.advance(),
        }
    }

    let literal = cursor.slice_from(start);
    dlc_value::Value::decode_json_string(literal)
        .map(TokenKind::Lit)
        .map_err(|e| LexError::InvalidString {
            reason: e.to_string(),
            span: start_span,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlc_value::Value;

    fn lex(s: &str) -> TokenKind {
        let mut c = Cursor::new(s);
        lex_string(&mut c, Span::new(1, 1)).unwrap()
    }

    #[test]
    fn lexes_plain_string() {
        assert_eq!(lex(r#""hello""#), TokenKind::Lit(Value::str("hello")));
    }

    #[test]
    fn lexes_escaped_quote_and_newline() {
        assert_eq!(lex(r#""a\"b\nc""#), TokenKind::Lit(Value::str("a\"b\nc")));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut c = Cursor::new("\"abc");
        assert!(lex_string(&mut c, Span::new(1, 1)).is_err());
    }

    #[test]
    fn unterminated_string_at_raw_newline_is_an_error() {
        let mut c = Cursor::new("\"abc\ndef\"");
        assert!(lex_string(&mut c, Span::new(1, 1)).is_err());
    }
}
