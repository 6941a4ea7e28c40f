//! Operator, punctuation, and regex/division lexing.
//!
//! Multi-char operators are tried before single-char ones, matching
//! spec.md §4.1 item 2's ordering (`original_source/di_lexer.c`'s
//! `operator_re` alternation is listed longest-first for the same reason:
//! PCRE alternation picks the first alternative that matches, so `<=` must
//! precede a bare `<`).

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::TokenKind;
use dlc_util::Span;

/// Tries to match a multi-char or single-char operator/punctuation token.
/// Returns `None` if the current character starts neither (e.g. `/`, which
/// [`lex_slash`] handles separately since it needs lookbehind).
pub fn lex_operator(cursor: &mut Cursor<'_>) -> Option<TokenKind> {
    let two = (cursor.current_char(), cursor.peek_char(cursor.current_char().len_utf8()));
    let kind = match two {
        ('-', '>') => Some(TokenKind::Arrow),
        ('<', '=') => Some(TokenKind::Le),
        ('>', '=') => Some(TokenKind::Ge),
        ('=', '=') => Some(TokenKind::EqEq),
        ('!', '=') => Some(TokenKind::Ne),
        _ => None,
    };
    if let Some(kind) = kind {
        cursor.advance();
        cursor.advance();
        return Some(kind);
    }

    let single = match cursor.current_char() {
        '≤' => Some(TokenKind::Le),
        '≥' => Some(TokenKind::Ge),
        '≠' => Some(TokenKind::Ne),
        '<' => Some(TokenKind::Lt),
        '>' => Some(TokenKind::Gt),
        ',' => Some(TokenKind::Comma),
        ':' => Some(TokenKind::Colon),
        ';' => Some(TokenKind::Semi),
        '=' => Some(TokenKind::Eq),
        '+' => Some(TokenKind::Plus),
        '*' => Some(TokenKind::Star),
        '~' => Some(TokenKind::Tilde),
        '@' => Some(TokenKind::At),
        '-' => Some(TokenKind::Minus),
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    };
    if let Some(kind) = single {
        cursor.advance();
        return Some(kind);
    }

    None
}

/// `/…/` with `\/` permitted as an escaped slash inside the pattern.
fn lex_regex_body(cursor: &mut Cursor<'_>, start_span: Span) -> Result<TokenKind, LexError> {
    let start = cursor.position();
    cursor.advance(); // opening /
    loop {
        if cursor.is_at_end() || cursor.current_char() == '\n' {
            return Err(LexError::UnterminatedRegex { span: start_span });
        }
        match cursor.current_char() {
            '\\' => {
                cursor.advance();
                if cursor.is_at_end() {
                    return Err(LexError::UnterminatedRegex { span: start_span });
                }
                cursor.advance();
            }
            '/' => {
                cursor.advance();
                break;
            }
            _ => cursor.advance(),
        }
    }
    let full = cursor.slice_from(start);
    let pattern = &full[1..full.len() - 1];
    Ok(TokenKind::Regex(pattern.into()))
}

/// Decides between division and a regex literal based on the previously
/// emitted token (spec.md §4.1 item 5 — the lexer's only lookbehind).
pub fn lex_slash_or_regex(
    cursor: &mut Cursor<'_>,
    prev: Option<&TokenKind>,
    start_span: Span,
) -> Result<TokenKind, LexError> {
    let division_context = prev.map(TokenKind::starts_division_context).unwrap_or(false);
    if division_context {
        cursor.advance();
        Ok(TokenKind::Slash)
    } else {
        lex_regex_body(cursor, start_span)
    }
}
