//! Lexer driver: layout handling plus per-token dispatch.

mod comment;
mod identifier;
mod number;
mod operator;
mod string;

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Token, TokenKind};
use dlc_util::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutOp {
    Do,
    Of,
    Let,
    Where,
}

impl LayoutOp {
    /// The keyword that explicitly closes a frame opened by this operator —
    /// `let` closes with `in`, everything else closes with `end`.
    fn closing_word(self) -> &'static str {
        match self {
            LayoutOp::Let => "in",
            LayoutOp::Do | LayoutOp::Of | LayoutOp::Where => "end",
        }
    }

    fn closing_kind(self) -> TokenKind {
        if self == LayoutOp::Let {
            TokenKind::In
        } else {
            TokenKind::End
        }
    }
}

struct LayoutFrame {
    op: LayoutOp,
    column: u32,
}

/// Stateful cursor over UTF-8 source, producing one [`Token`] per call to
/// [`Lexer::next_token`]. Owns the `layout` stack (spec.md §4.1 "Layout"):
/// one frame per unclosed `do`/`of`/`let`/`where`.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    layout: Vec<LayoutFrame>,
    last_kind: Option<TokenKind>,
    /// Set after emitting a token whose `op` opens a layout block, so the
    /// *next* call pushes a frame at the following token's column.
    pending_layout_open: Option<LayoutOp>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            layout: Vec::new(),
            last_kind: None,
            pending_layout_open: None,
        }
    }

    /// A lexer for a whole program rather than a nested block. spec.md
    /// §4.2's parser contract treats top-level source as the body of an
    /// implicit `do … end` block; this primes the layout stack exactly as
    /// if an (invisible) `do` token had just been emitted, so indentation
    /// alone separates top-level forms the same way it does inside an
    /// explicit block, and EOF closes it with a synthetic `end` rather than
    /// requiring one in the source.
    pub fn new_top_level(source: &'a str) -> Self {
        Self {
            pending_layout_open: Some(LayoutOp::Do),
            ..Self::new(source)
        }
    }

    /// Lexes the entire input into a token vector (used by the `lex` CLI
    /// command and by tests). Stops at the first error.
    pub fn lex_all(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        comment::skip_trivia(&mut self.cursor);

        // A frame opened this call covers the token we're about to lex, so
        // it must not immediately fire the "same column as the frame"
        // check below — that would insert a spurious `;` between the
        // opening keyword and the block's first form.
        if let Some(op) = self.pending_layout_open.take() {
            self.layout.push(LayoutFrame {
                op,
                column: self.cursor.column(),
            });
        } else if let Some(tok) = self.try_layout_synthetic_token()? {
            self.last_kind = Some(tok.kind.clone());
            return Ok(tok);
        }

        let span = Span::new(self.cursor.line(), self.cursor.column());

        if self.cursor.is_at_end() {
            let tok = Token::new(TokenKind::Eof, span);
            self.last_kind = Some(tok.kind.clone());
            return Ok(tok);
        }

        let kind = self.lex_one()?;
        if matches!(kind, TokenKind::Do | TokenKind::Of | TokenKind::Let | TokenKind::Where) {
            self.pending_layout_open = Some(match kind {
                TokenKind::Do => LayoutOp::Do,
                TokenKind::Of => LayoutOp::Of,
                TokenKind::Let => LayoutOp::Let,
                TokenKind::Where => LayoutOp::Where,
                _ => unreachable!(),
            });
        } else if let Some(frame) = self.layout.last() {
            // An explicit `end`/`in` closes the innermost frame itself,
            // rather than leaving it open for the indentation-based checks
            // in `try_layout_synthetic_token` to clean up later — those only
            // fire on a *column* mismatch, and an explicit terminator can
            // appear at any column.
            if kind == frame.op.closing_kind() {
                self.layout.pop();
            }
        }

        let tok = Token::new(kind, span);
        self.last_kind = Some(tok.kind.clone());
        Ok(tok)
    }

    /// Checks the top layout frame against the *current* column (whitespace
    /// and comments already skipped) and possibly returns a synthetic
    /// terminator or separator instead of advancing the cursor.
    fn try_layout_synthetic_token(&mut self) -> Result<Option<Token>, LexError> {
        let Some(frame) = self.layout.last() else {
            return Ok(None);
        };
        let span = Span::new(self.cursor.line(), self.cursor.column());
        let at_end = self.cursor.is_at_end();
        let column = self.cursor.column();

        if at_end || column < frame.column {
            let op = frame.op;
            self.layout.pop();
            let kind = if op == LayoutOp::Let { TokenKind::In } else { TokenKind::End };
            return Ok(Some(Token::new(kind, span)));
        }

        if column == frame.column
            && !self.last_kind.as_ref().map(TokenKind::is_semi).unwrap_or(false)
            && !self.peeked_word_is(frame.op.closing_word())
        {
            return Ok(Some(Token::new(TokenKind::Semi, span)));
        }

        Ok(None)
    }

    /// True if the upcoming source text is exactly `word` as a standalone
    /// word (not a prefix of a longer identifier). Used to recognize an
    /// explicit block terminator before it's lexed, so the column-equality
    /// check above doesn't synthesize a `;` right before it — an explicit
    /// `end`/`in` already closes the frame itself once lexed.
    fn peeked_word_is(&self, word: &str) -> bool {
        let rest = self.cursor.remaining();
        match rest.strip_prefix(word) {
            Some(after) => !after.starts_with(identifier::is_word_continue),
            None => false,
        }
    }

    fn lex_one(&mut self) -> Result<TokenKind, LexError> {
        let span = Span::new(self.cursor.line(), self.cursor.column());
        let c = self.cursor.current_char();

        if let Some(kind) = operator::lex_operator(&mut self.cursor) {
            return Ok(kind);
        }

        if c.is_ascii_digit() {
            return number::lex_number(&mut self.cursor, span);
        }

        if c == '"' {
            return string::lex_string(&mut self.cursor, span);
        }

        if c == '/' {
            return operator::lex_slash_or_regex(&mut self.cursor, self.last_kind.as_ref(), span);
        }

        if identifier::is_word_start(c) {
            return Ok(identifier::lex_word(&mut self.cursor));
        }

        Err(LexError::UnexpectedChar { found: c, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlc_value::Value;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::lex_all(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn scenario_1_integer_literal_has_no_separator_to_synthesize() {
        // A bare literal lexed outside any layout frame (`lex` CLI command,
        // not the parser's implicit top-level block) needs no separator:
        // there is only one form and nothing to separate it from.
        assert_eq!(kinds("42"), vec![TokenKind::Lit(Value::Int(42)), TokenKind::Eof]);
    }

    #[test]
    fn scenario_2_layout_block_closes_with_synthetic_end() {
        let toks = kinds("do\n  x = 1\n  x + 2");
        assert_eq!(toks.first(), Some(&TokenKind::Do));
        assert_eq!(toks.last(), Some(&TokenKind::Eof));
        assert!(toks.iter().any(|k| *k == TokenKind::End));
        let semi_count = toks.iter().filter(|k| **k == TokenKind::Semi).count();
        assert_eq!(semi_count, 1); // only between "x = 1" and "x + 2"
    }

    #[test]
    fn top_level_layout_separates_forms_by_indentation_alone() {
        let mut lexer = Lexer::new_top_level("x = 1\ny = 2");
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        let semi_count = kinds.iter().filter(|k| **k == TokenKind::Semi).count();
        assert_eq!(semi_count, 1);
        assert_eq!(kinds.iter().filter(|k| **k == TokenKind::End).count(), 1);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn top_level_single_form_closes_with_synthetic_end_and_no_semi() {
        let mut lexer = Lexer::new_top_level("42");
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        assert_eq!(kinds, vec![TokenKind::Lit(Value::Int(42)), TokenKind::End, TokenKind::Eof]);
    }

    #[test]
    fn scenario_8_division_vs_regex_disambiguation() {
        use dlc_util::Symbol;
        assert_eq!(
            kinds("a/b"),
            vec![
                TokenKind::Ident(Symbol::intern("a")),
                TokenKind::Slash,
                TokenKind::Ident(Symbol::intern("b")),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a = /b/"),
            vec![
                TokenKind::Ident(Symbol::intern("a")),
                TokenKind::Eq,
                TokenKind::Regex("b".into()),
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn let_block_closes_with_synthetic_in() {
        let toks = kinds("let\n  x = 1\nx");
        assert!(toks.contains(&TokenKind::In));
    }

    #[test]
    fn does_not_emit_two_consecutive_semicolons() {
        let toks = kinds("do\n  1\n  2\nend");
        let mut prev_was_semi = false;
        for k in &toks {
            let is_semi = *k == TokenKind::Semi;
            assert!(!(is_semi && prev_was_semi), "two consecutive synthetic semicolons");
            prev_was_semi = is_semi;
        }
    }

    #[test]
    fn unmatched_byte_is_a_lex_error() {
        assert!(Lexer::lex_all("`").is_err());
    }

    #[test]
    fn explicit_end_at_top_level_pops_its_own_frame_without_a_spurious_semicolon() {
        let mut lexer = Lexer::new_top_level("do\n  1;\nend");
        let mut kinds = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            kinds.push(tok.kind);
            if done {
                break;
            }
        }
        assert_eq!(
            kinds,
            vec![
                TokenKind::Do,
                TokenKind::Lit(Value::Int(1)),
                TokenKind::Semi,
                TokenKind::End,
                TokenKind::End,
                TokenKind::Eof,
            ]
        );
    }
}
