//! Character cursor for traversing source code.
//!
//! Tracks byte position, line, and column while advancing through the
//! source text. Column tracking rounds tabs up to the next multiple of 8
//! and treats `\r\n` as a single newline, matching `original_source/di_lexer.c`'s
//! whitespace-skipping loop (`column += 8 - (column - 1) % 8` on tab,
//! `nl_re = "\R"` for newline recognition).

const TAB_STOP: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
    column: u32,
}

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Advances past the current character, updating line/column.
    ///
    /// A `\r` immediately followed by `\n` advances as a single logical
    /// newline: the `\r` is consumed without moving the line counter, and
    /// the following `\n` does the actual line increment.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        let c = self.current_char();
        let len = c.len_utf8();

        match c {
            '\r' if self.char_at(len) == '\n' => {
                self.position += len;
            }
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                self.position += len;
                self.line += 1;
                self.column = 1;
            }
            '\t' => {
                self.position += len;
                self.column += TAB_STOP - (self.column - 1) % TAB_STOP;
            }
            _ => {
                self.position += len;
                self.column += 1;
            }
        }
    }

    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}
