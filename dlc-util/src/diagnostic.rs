//! Diagnostic reporting: errors and warnings with a source location.
//!
//! Every pass (lexer, parser, annotator) reports through the same small
//! vocabulary: a [`Level`], a message, a [`Span`], and an optional
//! [`DiagnosticCode`]. A [`Handler`] collects these as they're produced so
//! the CLI can decide what to do with them once a pass finishes, rather than
//! each pass deciding for itself how to print or when to exit.
//!
//! Deliberately simple: no snippet rendering, no builder indirection, since
//! every diagnostic this pipeline produces is a one-line `message @ span`.

use crate::Span;
use std::fmt;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A unique code identifying a class of diagnostic, e.g. `E0003`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    prefix: &'static str,
    number: u32,
}

impl DiagnosticCode {
    const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // Lexer (di_lexer.c: unmatched byte, unterminated literal).
    pub const E_LEX_UNEXPECTED_CHAR: Self = Self::new("E", 1001);
    pub const E_LEX_UNTERMINATED_STRING: Self = Self::new("E", 1002);
    pub const E_LEX_UNTERMINATED_REGEX: Self = Self::new("E", 1003);
    pub const E_LEX_INVALID_NUMBER: Self = Self::new("E", 1004);
    pub const E_LEX_BAD_LAYOUT: Self = Self::new("E", 1005);

    // Parser (di_parser.c: error_unexpected_token, no-recovery halt).
    pub const E_PARSE_UNEXPECTED_TOKEN: Self = Self::new("E", 2001);
    pub const E_PARSE_EXPECTED_TOKEN: Self = Self::new("E", 2002);
    pub const E_PARSE_UNEXPECTED_EOF: Self = Self::new("E", 2003);
    pub const E_PARSE_ARITY_MISMATCH: Self = Self::new("E", 2004);
    pub const E_PARSE_INVALID_PATTERN: Self = Self::new("E", 2005);

    // Annotator (di_annotate.c: "Undefined variable", pattern-match-on-fn).
    pub const E_SEM_UNDEFINED_VAR: Self = Self::new("E", 3001);
    pub const E_SEM_PATTERN_MATCH_ON_FUNCTION: Self = Self::new("E", 3002);

    // Warnings.
    pub const W_UNUSED_VARIABLE: Self = Self::new("W", 1);
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

/// A single diagnostic: a message at a source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

/// Accumulates diagnostics produced while running a pass.
///
/// Passes never print or `exit()` directly — they push onto a `Handler` and
/// let the caller (ultimately the `dlc` CLI) decide when to stop and how to
/// render the result. This mirrors spec.md §6's observation that `lex`,
/// `parse`, and the annotator all halt on the first error but have distinct
/// message wording.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::error(message, span));
    }

    pub fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.emit(Diagnostic::warning(message, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == Level::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_tracks_error_and_warning_counts_separately() {
        let mut handler = Handler::new();
        handler.error("bad token", Span::new(1, 1));
        handler.warning("unused variable `x`", Span::new(2, 3));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn diagnostic_display_includes_span_and_message() {
        let diag = Diagnostic::error("unexpected token", Span::new(3, 5));
        assert_eq!(format!("{diag}"), "3:5: unexpected token");
    }

    #[test]
    fn diagnostic_code_formats_as_prefix_plus_padded_number() {
        assert_eq!(DiagnosticCode::E_SEM_UNDEFINED_VAR.as_str(), "E3001");
        assert_eq!(DiagnosticCode::W_UNUSED_VARIABLE.as_str(), "W0001");
    }

    #[test]
    fn handler_without_errors_reports_clean() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.diagnostics().len(), 0);
    }
}
