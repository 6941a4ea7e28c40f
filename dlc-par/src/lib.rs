//! dlc-par — the Pratt/recursive-descent parser (spec.md §4.2).
//!
//! `Parser` holds one token of lookahead over a `dlc_lex::Lexer`, matching
//! the lexer/parser boundary spec.md §4.2 describes ("consumes one token of
//! lookahead from the lexer"). [`ast`] defines the tree; [`expr`] implements
//! the Pratt expression grammar; [`pattern`] validates expression/pattern
//! context; [`items`] assembles a `do` block's `seq`/`defs` from parsed
//! forms. There is no error recovery (spec.md §1 Non-goals): the first
//! [`ParseError`] aborts parsing.

pub mod ast;
mod edge_cases;
pub mod error;
mod expr;
mod items;
pub mod pattern;

pub use ast::{Ast, BinOp, Block, Clause, DictEntry, FuncDef, Node, NodeKind, UnOp};
pub use error::ParseError;

use dlc_lex::{Lexer, Token, TokenKind};
use dlc_util::{NodeId, NodeIdGenerator, Span};

/// Parses a complete source file into the implicit top-level `do` block
/// (spec.md §4.2 "Public contract").
pub fn parse(source: &str) -> Result<Ast, ParseError> {
    let mut parser = Parser::new(source)?;
    let span = parser.current.span;
    let block = items::parse_block(&mut parser)?;
    parser.expect(&TokenKind::Eof)?;
    Ok(Node::new(parser.node_ids.next(), span, NodeKind::Do(block)))
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    node_ids: NodeIdGenerator,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new_top_level(source);
        let current = lexer.next_token().map_err(lex_to_parse_error)?;
        Ok(Self {
            lexer,
            current,
            node_ids: NodeIdGenerator::new(),
        })
    }

    fn next_node_id(&self) -> NodeId {
        self.node_ids.next()
    }

    fn span(&self) -> Span {
        self.current.span
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    /// Advances past the current token, returning it.
    fn bump(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token().map_err(lex_to_parse_error)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consumes the current token if it matches `kind`, erroring otherwise.
    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.bump()
        } else {
            Err(ParseError::ExpectedToken {
                found: self.current.kind.to_string(),
                expected: kind.to_string(),
                span: self.current.span,
            })
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.current.kind.to_string(),
            span: self.current.span,
        }
    }
}

fn lex_to_parse_error(err: dlc_lex::LexError) -> ParseError {
    ParseError::UnexpectedToken {
        found: err.to_string(),
        span: err.span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_1_integer_literal() {
        let ast = parse("42").unwrap();
        match ast.kind {
            NodeKind::Do(block) => {
                assert_eq!(block.seq.len(), 1);
                assert!(block.defs.is_empty());
                assert!(matches!(block.seq[0].kind, NodeKind::Lit(_)));
            }
            other => panic!("expected do block, got {other:?}"),
        }
    }

    #[test]
    fn scenario_2_layout_block() {
        let ast = parse("do\n  x = 1\n  x + 2").unwrap();
        let NodeKind::Do(outer) = ast.kind else { panic!() };
        assert_eq!(outer.seq.len(), 1);
        let NodeKind::Do(inner) = &outer.seq[0].kind else {
            panic!("expected nested do")
        };
        assert_eq!(inner.seq.len(), 2);
        assert!(matches!(inner.seq[0].kind, NodeKind::Binary { op: BinOp::Eq, .. }));
        assert!(matches!(inner.seq[1].kind, NodeKind::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn scenario_3_function_definition_with_two_clauses() {
        let ast = parse("f(0) = 0\nf(n) = n * f(n-1)").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert!(block.seq.is_empty());
        let f = block.defs.get(&dlc_util::Symbol::intern("f")).unwrap();
        assert_eq!(f.arity, 1);
        assert_eq!(f.clauses.len(), 2);
    }

    #[test]
    fn scenario_6_regex_only_in_pattern() {
        let ast = parse("case s of /ab+/ -> 1 end");
        assert!(ast.is_ok());
        let err = parse("x = /ab+/").unwrap_err();
        assert!(matches!(err, ParseError::InvalidContext { .. }));
    }

    #[test]
    fn arity_mismatch_across_clauses_is_an_error() {
        let err = parse("f(x) = x\nf(x, y) = y").unwrap_err();
        assert!(matches!(err, ParseError::ArityMismatch { .. }));
    }

    #[test]
    fn unexpected_token_reports_its_location() {
        let err = parse(")").unwrap_err();
        assert_eq!(err.span(), Span::new(1, 1));
    }
}
