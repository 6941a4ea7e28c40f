//! Expression parsing via Pratt (top-down operator precedence) parsing
//! (spec.md §4.2 "Grammar").
//!
//! `original_source/di_parser.c`'s `expr`/`expr1`/`expr2`/`expr3` functions
//! implement the same precedence ladder as one hand-written recursive
//! function per level (`leftassoc_expr(p, next, "op", "op", NULL)`); this
//! module collapses that ladder into a single binding-power table and one
//! climbing loop, the idiom `faxc-par/src/expr.rs`'s `bp` module uses.
//!
//! # Operator precedence (lowest to highest)
//!
//! | bp | operators | associativity |
//! |----|-----------|---------------|
//! | 2  | `=`                          | right |
//! | 4  | `and`, `or`                  | left  |
//! | 6  | `<`, `>`, `<=`, `>=`, `==`, `!=` | left |
//! | 8  | `+`, `-`, `~`, `@`           | left  |
//! | 10 | `*`, `/`, `mod`              | left  |
//!
//! Prefix `-`/`not` bind tighter than all of the above: their operand is
//! parsed at a binding power above multiplication's right side, so
//! `-a * b` parses as `(-a) * b` and `not a and b` as `(not a) and b`.

use crate::ast::{BinOp, Block, Clause, DictEntry, Node, NodeKind, UnOp};
use crate::error::ParseError;
use crate::items;
use crate::pattern::validate_pattern;
use crate::Parser;
use dlc_lex::TokenKind;

const UNARY_BP: u8 = 11;

fn infix_bp(kind: &TokenKind) -> Option<(u8, u8, BinOp)> {
    Some(match kind {
        TokenKind::Eq => (2, 2, BinOp::Eq), // right-associative
        TokenKind::And => (4, 5, BinOp::And),
        TokenKind::Or => (4, 5, BinOp::Or),
        TokenKind::Lt => (6, 7, BinOp::Lt),
        TokenKind::Gt => (6, 7, BinOp::Gt),
        TokenKind::Le => (6, 7, BinOp::Le),
        TokenKind::Ge => (6, 7, BinOp::Ge),
        TokenKind::EqEq => (6, 7, BinOp::EqEq),
        TokenKind::Ne => (6, 7, BinOp::Ne),
        TokenKind::Plus => (8, 9, BinOp::Add),
        TokenKind::Minus => (8, 9, BinOp::Sub),
        TokenKind::Tilde => (8, 9, BinOp::Tilde),
        TokenKind::At => (8, 9, BinOp::At),
        TokenKind::Star => (10, 11, BinOp::Mul),
        TokenKind::Slash => (10, 11, BinOp::Div),
        TokenKind::Mod => (10, 11, BinOp::Mod),
        _ => return None,
    })
}

impl<'a> Parser<'a> {
    /// Parses a full expression, including a possible trailing `"=" expr`
    /// (spec.md's `expr := expr0 ("=" expr)?`).
    pub fn parse_expr(&mut self) -> Result<Node, ParseError> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Node, ParseError> {
        let mut lhs = self.parse_prefix()?;
        loop {
            let Some((lbp, rbp, op)) = infix_bp(&self.current.kind) else {
                break;
            };
            if lbp < min_bp {
                break;
            }
            self.bump()?;
            let rhs = self.parse_expr_bp(rbp)?;
            let span = lhs.span;
            lhs = Node::new(
                self.next_node_id(),
                span,
                NodeKind::Binary {
                    op,
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
            );
        }
        Ok(lhs)
    }

    /// Parses an atom (expr5) plus any trailing `(args)`/`{entries}`
    /// postfixes (expr4's "function application" / "dict update" layer) and
    /// any leading unary prefix.
    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let span = self.span();
        let atom = match self.current.kind.clone() {
            TokenKind::Minus => {
                self.bump()?;
                let right = self.parse_expr_bp(UNARY_BP)?;
                Node::new(
                    self.next_node_id(),
                    span,
                    NodeKind::Unary {
                        op: UnOp::Neg,
                        right: Box::new(right),
                    },
                )
            }
            TokenKind::Not => {
                self.bump()?;
                let right = self.parse_expr_bp(UNARY_BP)?;
                Node::new(
                    self.next_node_id(),
                    span,
                    NodeKind::Unary {
                        op: UnOp::Not,
                        right: Box::new(right),
                    },
                )
            }
            TokenKind::Ident(name) => {
                self.bump()?;
                Node::new(self.next_node_id(), span, NodeKind::Var(name))
            }
            TokenKind::Lit(value) => {
                self.bump()?;
                Node::new(self.next_node_id(), span, NodeKind::Lit(value))
            }
            TokenKind::Regex(pattern) => {
                self.bump()?;
                Node::new(self.next_node_id(), span, NodeKind::Regex(pattern))
            }
            TokenKind::LParen => {
                self.bump()?;
                let inner = self.parse_expr_bp(0)?;
                self.expect(&TokenKind::RParen)?;
                inner
            }
            TokenKind::LBracket => self.parse_array(span)?,
            TokenKind::LBrace => self.parse_dict(span)?,
            TokenKind::Case => self.parse_case(span)?,
            TokenKind::Do => self.parse_do(span)?,
            TokenKind::If => self.parse_if(span)?,
            _ => return Err(self.unexpected()),
        };
        self.parse_postfix(atom)
    }

    /// expr4's `( "(" args? ")" | "{" entries? "}" )*` loop.
    fn parse_postfix(&mut self, mut lhs: Node) -> Result<Node, ParseError> {
        loop {
            lhs = match self.current.kind {
                TokenKind::LParen => {
                    self.bump()?;
                    let args = self.parse_comma_separated(&TokenKind::RParen, Self::parse_expr)?;
                    self.expect(&TokenKind::RParen)?;
                    let span = lhs.span;
                    Node::new(
                        self.next_node_id(),
                        span,
                        NodeKind::Apply {
                            func: Box::new(lhs),
                            args,
                        },
                    )
                }
                TokenKind::LBrace => {
                    self.bump()?;
                    let entries = self.parse_dict_entries(&TokenKind::RBrace)?;
                    self.expect(&TokenKind::RBrace)?;
                    let span = lhs.span;
                    Node::new(
                        self.next_node_id(),
                        span,
                        NodeKind::DictUp {
                            subj: Box::new(lhs),
                            entries,
                        },
                    )
                }
                _ => break,
            };
        }
        Ok(lhs)
    }

    fn parse_array(&mut self, span: dlc_util::Span) -> Result<Node, ParseError> {
        self.expect(&TokenKind::LBracket)?;
        let elems = self.parse_comma_separated(&TokenKind::RBracket, Self::parse_expr)?;
        self.expect(&TokenKind::RBracket)?;
        Ok(Node::new(self.next_node_id(), span, NodeKind::Array(elems)))
    }

    fn parse_dict(&mut self, span: dlc_util::Span) -> Result<Node, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let entries = self.parse_dict_entries(&TokenKind::RBrace)?;
        self.expect(&TokenKind::RBrace)?;
        Ok(Node::new(self.next_node_id(), span, NodeKind::Dict(entries)))
    }

    fn parse_dict_entries(&mut self, close: &TokenKind) -> Result<Vec<DictEntry>, ParseError> {
        self.parse_comma_separated(close, |p| {
            let span = p.span();
            let key = p.parse_expr()?;
            p.expect(&TokenKind::Colon)?;
            let value = p.parse_expr()?;
            Ok(DictEntry { span, key, value })
        })
    }

    /// Parses zero or more comma-separated items up to (but not consuming)
    /// `close`.
    fn parse_comma_separated<T>(
        &mut self,
        close: &TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.check(&TokenKind::Comma) {
                self.bump()?;
                continue;
            }
            break;
        }
        Ok(items)
    }

    fn parse_case(&mut self, span: dlc_util::Span) -> Result<Node, ParseError> {
        self.expect(&TokenKind::Case)?;
        let subj = self.parse_expr_bp(0)?;
        self.expect(&TokenKind::Of)?;
        let clauses = self.parse_case_clauses()?;
        Ok(Node::new(
            self.next_node_id(),
            span,
            NodeKind::Case {
                subj: Box::new(subj),
                clauses,
            },
        ))
    }

    fn parse_case_clauses(&mut self) -> Result<Vec<Clause>, ParseError> {
        let mut clauses = Vec::new();
        loop {
            let clause_span = self.span();
            let pat = self.parse_expr_bp(0)?;
            validate_pattern(&pat)?;
            self.expect(&TokenKind::Arrow)?;
            let body = self.parse_expr_bp(0)?;
            crate::pattern::validate_expr(&body)?;
            clauses.push(Clause {
                id: self.next_node_id(),
                span: clause_span,
                pats: vec![pat],
                body,
            });
            if self.check(&TokenKind::Semi) {
                self.bump()?;
                continue;
            }
            break;
        }
        self.expect(&TokenKind::End)?;
        Ok(clauses)
    }

    fn parse_do(&mut self, span: dlc_util::Span) -> Result<Node, ParseError> {
        self.expect(&TokenKind::Do)?;
        let block: Block = items::parse_block(self)?;
        Ok(Node::new(self.next_node_id(), span, NodeKind::Do(block)))
    }

    fn parse_if(&mut self, span: dlc_util::Span) -> Result<Node, ParseError> {
        self.expect(&TokenKind::If)?;
        let cond = self.parse_expr_bp(0)?;
        self.expect(&TokenKind::Then)?;
        let then_branch = self.parse_expr_bp(0)?;
        if self.check(&TokenKind::Semi) {
            self.bump()?;
        }
        self.expect(&TokenKind::Else)?;
        let else_branch = self.parse_expr_bp(0)?;
        Ok(Node::new(
            self.next_node_id(),
            span,
            NodeKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
        ))
    }
}
