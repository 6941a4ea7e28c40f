//! Whitespace and comment skipping.
//!
//! Comments run from `#` to the end of line (spec.md §4.1 item 1). Both
//! horizontal whitespace and comments are skipped before every token match
//! attempt; skipping never crosses the layout check in the caller, since
//! layout decisions are made against the column *after* this runs.

use crate::cursor::Cursor;
use crate::unicode::is_horizontal_space;

/// Skips runs of horizontal whitespace and `#`-comments. Stops at the first
/// newline, real token character, or end of input.
pub fn skip_trivia(cursor: &mut Cursor<'_>) {
    loop {
        if is_horizontal_space(cursor.current_char()) {
            cursor.advance();
            continue;
        }
        if cursor.current_char() == '#' {
            while !cursor.is_at_end() && cursor.current_char() != '\n' {
                cursor.advance();
            }
            continue;
        }
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_spaces_and_tabs() {
        let mut c = Cursor::new("   \t\tx");
        skip_trivia(&mut c);
        assert_eq!(c.current_char(), 'x');
    }

    #[test]
    fn skips_comment_up_to_newline() {
        let mut c = Cursor::new("# a comment\nx");
        skip_trivia(&mut c);
        assert_eq!(c.current_char(), '\n');
    }

    #[test]
    fn does_not_cross_newlines() {
        let mut c = Cursor::new("  \nx");
        skip_trivia(&mut c);
        assert_eq!(c.current_char(), '\n');
    }
}
