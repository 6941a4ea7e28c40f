//! Numeric literal lexing.
//!
//! Grammar (spec.md §4.1 item 3): optional `-`, integer `0|[1-9]\d*`,
//! optional fraction `.\d+`, optional exponent `[eE][+-]?\d+`. In practice
//! the leading `-` never fires here: operators are matched before numbers
//! (spec.md §4.1's token-class ordering), so a leading `-` is always
//! already consumed as the `Minus` operator token and unary negation is a
//! parser-level construct, not a lexer one.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::TokenKind;
use dlc_util::Span;
use dlc_value::Value;

pub fn lex_number(cursor: &mut Cursor<'_>, start_span: Span) -> Result<TokenKind, LexError> {
    let start = cursor.position();

    if cursor.current_char() == '0' {
        cursor.advance();
    } else {
        while cursor.current_char().is_ascii_digit() {
            cursor.advance();
        }
    }

    if cursor.current_char() == '.' && cursor.peek_char(1).is_ascii_digit() {
        cursor.advance();
        while cursor.current_char().is_ascii_digit() {
            cursor.advance();
        }
    }

    if matches!(cursor.current_char(), 'e' | 'E') {
        let mut lookahead = 1;
        if matches!(cursor.peek_char(1), '+' | '-') {
            lookahead = 2;
        }
        if cursor.peek_char(lookahead).is_ascii_digit() {
            cursor.advance_n(lookahead);
            while cursor.current_char().is_ascii_digit() {
                cursor.advance();
            }
        }
    }

    let text = cursor.slice_from(start);
    if text.is_empty() {
        return Err(LexError::InvalidNumber {
            text: text.to_string(),
            span: start_span,
        });
    }

    Ok(TokenKind::Lit(Value::decode_json_number(text)))
}
