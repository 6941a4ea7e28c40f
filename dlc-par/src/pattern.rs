//! Pattern validation (spec.md §4.2 "Validation").
//!
//! The grammar parses patterns and expressions through the same Pratt
//! machinery (`expr.rs`) since both share an operator-precedence syntax;
//! after a subtree is parsed in a given context, [`validate_pattern`] or
//! [`validate_expr`] walks it to reject node kinds that are syntactically
//! well-formed but illegal for that context. `original_source/di_annotate.c`
//! instead rechecks pattern shape inside the annotator; this front-end
//! validates at parse time per spec.md §4.2's explicit
//! `validate_expr`/`validate_pattern` contract, so a malformed pattern is a
//! parse error rather than a later semantic one.

use crate::ast::{Node, NodeKind};
use crate::error::ParseError;

/// Rejects `do`, `if`, `case`, `apply`, and non-pattern-legal operators
/// (spec.md §4.2: "`validate_pattern` forbids `do`, `if`, `case`, `apply`,
/// arithmetic/relational/logical operators").
pub fn validate_pattern(node: &Node) -> Result<(), ParseError> {
    match &node.kind {
        NodeKind::Lit(_) | NodeKind::Var(_) | NodeKind::Regex(_) => Ok(()),
        NodeKind::Array(elems) => elems.iter().try_for_each(validate_pattern),
        NodeKind::Dict(entries) => entries.iter().try_for_each(|e| {
            validate_pattern(&e.key)?;
            validate_pattern(&e.value)
        }),
        NodeKind::DictUp { subj, entries } => {
            validate_pattern(subj)?;
            entries.iter().try_for_each(|e| {
                validate_pattern(&e.key)?;
                validate_pattern(&e.value)
            })
        }
        NodeKind::Binary { op, left, right } if op.is_pattern_legal() => {
            validate_pattern(left)?;
            validate_pattern(right)
        }
        NodeKind::Do(_) | NodeKind::If { .. } | NodeKind::Case { .. } | NodeKind::Apply { .. } | NodeKind::Unary { .. } | NodeKind::Binary { .. } => {
            Err(ParseError::InvalidContext {
                context: "pattern",
                reason: format!("{} is not allowed in a pattern", node_label(&node.kind)),
                span: node.span,
            })
        }
    }
}

/// Rejects `=` (outside the top level of a block, where `items.rs` already
/// peeled it off before this validator ever sees it) and bare `regex`
/// literals (spec.md §4.2: "`validate_expr` forbids `=` ... and `regex`").
pub fn validate_expr(node: &Node) -> Result<(), ParseError> {
    match &node.kind {
        NodeKind::Lit(_) | NodeKind::Var(_) => Ok(()),
        NodeKind::Regex(_) => Err(ParseError::InvalidContext {
            context: "expression",
            reason: "Regular expression can't be used in this context.".to_string(),
            span: node.span,
        }),
        NodeKind::Array(elems) => elems.iter().try_for_each(validate_expr),
        NodeKind::Dict(entries) => entries.iter().try_for_each(|e| {
            validate_expr(&e.key)?;
            validate_expr(&e.value)
        }),
        NodeKind::DictUp { subj, entries } => {
            validate_expr(subj)?;
            entries.iter().try_for_each(|e| {
                validate_expr(&e.key)?;
                validate_expr(&e.value)
            })
        }
        NodeKind::Apply { func, args } => {
            validate_expr(func)?;
            args.iter().try_for_each(validate_expr)
        }
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            validate_expr(cond)?;
            validate_expr(then_branch)?;
            validate_expr(else_branch)
        }
        NodeKind::Case { subj, clauses } => {
            validate_expr(subj)?;
            clauses.iter().try_for_each(|c| {
                c.pats.iter().try_for_each(validate_pattern)?;
                validate_expr(&c.body)
            })
        }
        NodeKind::Do(block) => {
            for def in block.defs.values() {
                for clause in &def.clauses {
                    clause.pats.iter().try_for_each(validate_pattern)?;
                    validate_expr(&clause.body)?;
                }
            }
            block.seq.iter().try_for_each(validate_seq_form)
        }
        NodeKind::Unary { right, .. } => validate_expr(right),
        NodeKind::Binary { op, left, right } => {
            if *op == crate::ast::BinOp::Eq {
                return Err(ParseError::InvalidContext {
                    context: "expression",
                    reason: "'=' is only allowed in a do block and on top level".to_string(),
                    span: node.span,
                });
            }
            validate_expr(left)?;
            validate_expr(right)
        }
    }
}

/// Validates one element of a `do` block's `seq`. `items::classify_eq_form`
/// stores a let-binding as a raw `Binary{op: Eq}` node rather than stripping
/// it down to just its right-hand side, so re-validating a block's `seq`
/// (e.g. when the block itself appears in expression position) must give
/// that node the same pattern/expr split `items.rs` gave it when the form
/// was first parsed, instead of handing it to `validate_expr` whole — which
/// would reject the `=` itself as if it were a bare equality expression.
fn validate_seq_form(node: &Node) -> Result<(), ParseError> {
    match &node.kind {
        NodeKind::Binary { op, left, right } if *op == crate::ast::BinOp::Eq => {
            validate_pattern(left)?;
            validate_expr(right)
        }
        _ => validate_expr(node),
    }
}

fn node_label(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Lit(_) => "a literal",
        NodeKind::Var(_) => "a variable",
        NodeKind::Regex(_) => "a regular expression",
        NodeKind::Array(_) => "an array",
        NodeKind::Dict(_) => "a dict",
        NodeKind::DictUp { .. } => "a dict update",
        NodeKind::Apply { .. } => "a function application",
        NodeKind::If { .. } => "an if expression",
        NodeKind::Case { .. } => "a case expression",
        NodeKind::Do(_) => "a do block",
        NodeKind::Unary { .. } => "a unary operator",
        NodeKind::Binary { .. } => "a binary operator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinOp;
    use dlc_util::{NodeId, Span, Symbol};
    use dlc_value::Value;

    fn lit(n: i32) -> Node {
        Node::new(NodeId::from_usize(0), Span::new(1, 1), NodeKind::Lit(Value::Int(n)))
    }

    fn var(name: &str) -> Node {
        Node::new(
            NodeId::from_usize(0),
            Span::new(1, 1),
            NodeKind::Var(Symbol::intern(name)),
        )
    }

    #[test]
    fn pattern_allows_at_tilde_eq_operators() {
        for op in [BinOp::At, BinOp::Tilde, BinOp::Eq] {
            let node = Node::new(
                NodeId::from_usize(0),
                Span::new(1, 1),
                NodeKind::Binary {
                    op,
                    left: Box::new(var("x")),
                    right: Box::new(lit(1)),
                },
            );
            assert!(validate_pattern(&node).is_ok());
        }
    }

    #[test]
    fn pattern_rejects_arithmetic_operator() {
        let node = Node::new(
            NodeId::from_usize(0),
            Span::new(1, 1),
            NodeKind::Binary {
                op: BinOp::Add,
                left: Box::new(var("x")),
                right: Box::new(lit(1)),
            },
        );
        assert!(validate_pattern(&node).is_err());
    }

    #[test]
    fn pattern_rejects_apply() {
        let node = Node::new(
            NodeId::from_usize(0),
            Span::new(1, 1),
            NodeKind::Apply {
                func: Box::new(var("f")),
                args: vec![lit(1)],
            },
        );
        assert!(validate_pattern(&node).is_err());
    }

    #[test]
    fn expr_rejects_bare_regex() {
        let node = Node::new(NodeId::from_usize(0), Span::new(1, 1), NodeKind::Regex("ab+".into()));
        assert!(validate_expr(&node).is_err());
    }

    #[test]
    fn expr_rejects_bare_eq() {
        let node = Node::new(
            NodeId::from_usize(0),
            Span::new(1, 1),
            NodeKind::Binary {
                op: BinOp::Eq,
                left: Box::new(var("x")),
                right: Box::new(lit(1)),
            },
        );
        assert!(validate_expr(&node).is_err());
    }

    #[test]
    fn expr_allows_a_do_block_whose_seq_has_a_let_binding() {
        // A nested `do` containing a let-binding, as `items.rs` leaves it in
        // `seq` (a raw `Binary{op: Eq}` node) rather than as a bare
        // expression — validating the outer block must not re-reject it.
        let binding = Node::new(
            NodeId::from_usize(0),
            Span::new(1, 1),
            NodeKind::Binary {
                op: BinOp::Eq,
                left: Box::new(var("x")),
                right: Box::new(lit(1)),
            },
        );
        let block = crate::ast::Block {
            seq: vec![binding, var("x")],
            defs: indexmap::IndexMap::new(),
        };
        let node = Node::new(NodeId::from_usize(0), Span::new(1, 1), NodeKind::Do(block));
        assert!(validate_expr(&node).is_ok());
    }
}
