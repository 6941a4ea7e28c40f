//! Block assembly (spec.md §4.2 "Block assembly").
//!
//! A `do` block parses a `;`-separated sequence of forms terminated by
//! `end` and partitions them into `seq` (plain expressions and let-bindings)
//! and `defs` (multi-clause function definitions), mirroring
//! `original_source/di_annotate.c`'s `block()` — which performs the same
//! split, but at annotation time over an already-parsed `"do"` node, since
//! the original grammar (`di_parser.c`'s `expr_seq`) never classifies forms
//! during parsing at all. Doing the split here, during parsing, lets the
//! parser catch a sibling-clause arity mismatch immediately instead of
//! deferring it to the annotator.

use crate::ast::{Block, Clause, FuncDef, Node, NodeKind};
use crate::error::ParseError;
use crate::pattern::{validate_expr, validate_pattern};
use crate::Parser;
use dlc_lex::TokenKind;
use dlc_util::{Span, Symbol};

/// Parses the body of a `do`/top-level block up to and including its
/// closing `end` (real or synthesized by layout).
pub fn parse_block(parser: &mut Parser<'_>) -> Result<Block, ParseError> {
    let mut block = Block::default();
    loop {
        if parser.check(&TokenKind::End) {
            parser.bump()?;
            break;
        }
        let form = parser.parse_expr()?;
        classify_form(parser, &mut block, form)?;
        if parser.check(&TokenKind::Semi) {
            parser.bump()?;
            continue;
        }
        if parser.check(&TokenKind::End) {
            parser.bump()?;
            break;
        }
        return Err(parser.unexpected());
    }
    Ok(block)
}

fn classify_form(parser: &Parser<'_>, block: &mut Block, form: Node) -> Result<(), ParseError> {
    let Node { id, span, kind } = form;
    match kind {
        NodeKind::Binary {
            op: crate::ast::BinOp::Eq,
            left,
            right,
        } => classify_eq_form(parser, block, span, *left, right),
        other => {
            let node = Node::new(id, span, other);
            validate_expr(&node)?;
            block.seq.push(node);
            Ok(())
        }
    }
}

/// Handles a top-level `left = right` form: either a function-definition
/// clause (if `left` is `apply(var name, args)`) or a let-binding expression
/// (spec.md §4.2: "If the form is `=` and its LHS has `syntax == "apply"`
/// whose `func` is a `var`, it is a function-definition clause... Otherwise
/// the form is an expression... whose LHS is validated as a pattern").
fn classify_eq_form(
    parser: &Parser<'_>,
    block: &mut Block,
    span: Span,
    left: Node,
    right: Box<Node>,
) -> Result<(), ParseError> {
    let Node {
        id: left_id,
        span: left_span,
        kind: left_kind,
    } = left;
    match left_kind {
        NodeKind::Apply { func, args } => match func.kind {
            NodeKind::Var(name) => {
                for pat in &args {
                    validate_pattern(pat)?;
                }
                validate_expr(&right)?;
                let clause = Clause {
                    id: parser.next_node_id(),
                    span,
                    pats: args,
                    body: *right,
                };
                insert_clause(block, name, clause, span)
            }
            _ => Err(ParseError::InvalidContext {
                context: "pattern",
                reason: "function-definition left-hand side must apply a plain name".to_string(),
                span: func.span,
            }),
        },
        other => {
            let left_node = Node::new(left_id, left_span, other);
            validate_pattern(&left_node)?;
            validate_expr(&right)?;
            block.seq.push(Node::new(
                parser.next_node_id(),
                span,
                NodeKind::Binary {
                    op: crate::ast::BinOp::Eq,
                    left: Box::new(left_node),
                    right,
                },
            ));
            Ok(())
        }
    }
}

/// Accumulates a clause under its function's name, checking that every
/// clause sharing a name has identical arity (spec.md §4.2: "All clauses
/// for a single name must have identical arity... otherwise an
/// arity-mismatch error is raised at the offending clause").
fn insert_clause(block: &mut Block, name: Symbol, clause: Clause, span: Span) -> Result<(), ParseError> {
    let arity = clause.pats.len();
    match block.defs.get_mut(&name) {
        Some(def) => {
            if def.arity != arity {
                return Err(ParseError::ArityMismatch {
                    name: name.as_str().to_string(),
                    first_arity: def.arity,
                    arity,
                    span,
                });
            }
            def.clauses.push(clause);
            Ok(())
        }
        None => {
            block.defs.insert(
                name,
                FuncDef {
                    name,
                    arity,
                    clauses: vec![clause],
                    span,
                },
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, BinOp, NodeKind};

    #[test]
    fn plain_expression_joins_seq() {
        let ast = parse("1\n2").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert_eq!(block.seq.len(), 2);
        assert!(block.defs.is_empty());
    }

    #[test]
    fn let_binding_stays_in_seq_as_eq_node() {
        let ast = parse("x = 1\nx").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert_eq!(block.seq.len(), 2);
        assert!(matches!(block.seq[0].kind, NodeKind::Binary { op: BinOp::Eq, .. }));
    }

    #[test]
    fn function_clauses_accumulate_under_one_name() {
        let ast = parse("f(0) = 0\nf(n) = n").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        let f = block.defs.get(&dlc_util::Symbol::intern("f")).unwrap();
        assert_eq!(f.clauses.len(), 2);
        assert!(block.seq.is_empty());
    }

    #[test]
    fn pattern_matching_on_invalid_lhs_is_rejected() {
        // `1(x) = x` has a non-var apply func: reject.
        let err = parse("1(x) = x");
        assert!(err.is_err());
    }
}
