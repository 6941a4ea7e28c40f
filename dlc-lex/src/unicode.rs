//! Unicode character classification for identifiers and newlines.
//!
//! Deliberately narrow: numeric-literal digit classification and
//! escape-sequence codepoint parsing live in `dlc-value`'s JSON decoder
//! instead, since number and string escapes are decoded there.

/// True for characters allowed to start an identifier: ASCII letters and
/// underscore take the fast path, anything else falls back to
/// `char::is_alphabetic` so identifiers can use non-ASCII letters.
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// True for characters allowed to continue an identifier after its first.
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// True for any Unicode newline sequence recognized by
/// `original_source/di_lexer.c`'s `nl_re = "\R"`: `\n`, `\r`, `\u{2028}`
/// (line separator), `\u{2029}` (paragraph separator). `\r\n` is handled by
/// the cursor as a single logical newline rather than here.
pub fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// True for horizontal whitespace (`di_lexer.c`'s `spaces_re = "\h+"`):
/// space, tab, and other Unicode space separators, excluding newlines.
pub fn is_horizontal_space(c: char) -> bool {
    !is_newline(c) && c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_unicode_letters_start_identifiers() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('_'));
        assert!(is_ident_start('α'));
        assert!(!is_ident_start('1'));
        assert!(!is_ident_start(' '));
    }

    #[test]
    fn digits_continue_but_do_not_start_identifiers() {
        assert!(is_ident_continue('1'));
        assert!(!is_ident_start('1'));
    }

    #[test]
    fn newline_classification_covers_unicode_separators() {
        assert!(is_newline('\n'));
        assert!(is_newline('\u{2028}'));
        assert!(!is_newline(' '));
    }

    #[test]
    fn horizontal_space_excludes_newlines() {
        assert!(is_horizontal_space(' '));
        assert!(is_horizontal_space('\t'));
        assert!(!is_horizontal_space('\n'));
    }
}
