//! Pseudo-source re-rendering of a parsed AST (`dlc pp`).
//!
//! Grounded in `original_source/di_prettyprint.c`'s `is_binop` table: binary
//! operators are printed infix and only parenthesized when the child's
//! precedence is lower than what the surrounding expression requires, the
//! same binding powers `dlc_par::expr`'s Pratt parser climbs by. This is a
//! diagnostic renderer (spec.md §6), not a round-trippable source printer —
//! whitespace and comments are not preserved.

use std::fmt::Write as _;

use dlc_par::ast::{BinOp, Block, Clause, DictEntry, FuncDef, Node, NodeKind, UnOp};

const UNARY_BP: u8 = 11;

fn bin_op_str(op: BinOp) -> &'static str {
    match op {
        BinOp::And => "and",
        BinOp::Or => "or",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::Le => "<=",
        BinOp::Ge => ">=",
        BinOp::EqEq => "==",
        BinOp::Ne => "!=",
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "mod",
        BinOp::Tilde => "~",
        BinOp::At => "@",
        BinOp::Eq => "=",
    }
}

/// `(left_bp, right_bp)` matching `dlc_par::expr::infix_bp`.
fn bin_op_bp(op: BinOp) -> (u8, u8) {
    match op {
        BinOp::Eq => (2, 2),
        BinOp::And | BinOp::Or => (4, 5),
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::EqEq | BinOp::Ne => (6, 7),
        BinOp::Add | BinOp::Sub | BinOp::Tilde | BinOp::At => (8, 9),
        BinOp::Mul | BinOp::Div | BinOp::Mod => (10, 11),
    }
}

pub fn render(ast: &Node) -> String {
    let mut out = String::new();
    render_block(&mut out, block_of(ast), 0);
    out
}

fn block_of(node: &Node) -> &Block {
    match &node.kind {
        NodeKind::Do(block) => block,
        _ => unreachable!("dlc_par::parse always returns a top-level Do node"),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn render_block(out: &mut String, block: &Block, depth: usize) {
    for def in block.defs.values() {
        render_func_def(out, def, depth);
    }
    for (i, expr) in block.seq.iter().enumerate() {
        if i > 0 || !block.defs.is_empty() {
            out.push('\n');
        }
        indent(out, depth);
        render_expr(out, expr, 0);
        out.push('\n');
    }
}

fn render_func_def(out: &mut String, def: &FuncDef, depth: usize) {
    for clause in &def.clauses {
        indent(out, depth);
        let _ = write!(out, "{}(", def.name);
        for (i, pat) in clause.pats.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            render_expr(out, pat, 0);
        }
        out.push_str(") = ");
        render_expr(out, &clause.body, 0);
        out.push('\n');
    }
}

fn render_clause(out: &mut String, clause: &Clause, depth: usize) {
    indent(out, depth);
    for (i, pat) in clause.pats.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_expr(out, pat, 0);
    }
    out.push_str(" -> ");
    render_expr(out, &clause.body, 0);
    out.push('\n');
}

fn render_entry(out: &mut String, entry: &DictEntry) {
    render_expr(out, &entry.key, 0);
    out.push_str(": ");
    render_expr(out, &entry.value, 0);
}

/// Renders `node`, wrapping it in parens if its own precedence is lower
/// than `min_bp` (the binding power the surrounding context requires).
fn render_expr(out: &mut String, node: &Node, min_bp: u8) {
    match &node.kind {
        NodeKind::Lit(v) => out.push_str(&dlc_value::pretty_print(v)),
        NodeKind::Var(name) => {
            let _ = write!(out, "{name}");
        }
        NodeKind::Regex(pattern) => {
            let _ = write!(out, "/{pattern}/");
        }
        NodeKind::Array(elems) => {
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_expr(out, elem, 0);
            }
            out.push(']');
        }
        NodeKind::Dict(entries) => {
            out.push('{');
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_entry(out, entry);
            }
            out.push('}');
        }
        NodeKind::DictUp { subj, entries } => {
            render_expr(out, subj, UNARY_BP);
            out.push('{');
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_entry(out, entry);
            }
            out.push('}');
        }
        NodeKind::Apply { func, args } => {
            render_expr(out, func, UNARY_BP);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_expr(out, arg, 0);
            }
            out.push(')');
        }
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str("if ");
            render_expr(out, cond, 0);
            out.push_str(" then ");
            render_expr(out, then_branch, 0);
            out.push_str(" else ");
            render_expr(out, else_branch, 0);
        }
        NodeKind::Case { subj, clauses } => {
            out.push_str("case ");
            render_expr(out, subj, 0);
            out.push_str(" of\n");
            for clause in clauses {
                render_clause(out, clause, 1);
            }
            out.push_str("end");
        }
        NodeKind::Do(block) => {
            out.push_str("do\n");
            render_block(out, block, 1);
            out.push_str("end");
        }
        NodeKind::Unary { op, right } => {
            out.push_str(match op {
                UnOp::Neg => "-",
                UnOp::Not => "not ",
            });
            render_expr(out, right, UNARY_BP);
        }
        NodeKind::Binary { op, left, right } => {
            let (lbp, rbp) = bin_op_bp(*op);
            let own_bp = lbp;
            let wrap = own_bp < min_bp;
            if wrap {
                out.push('(');
            }
            render_expr(out, left, lbp);
            let _ = write!(out, " {} ", bin_op_str(*op));
            render_expr(out, right, rbp);
            if wrap {
                out.push(')');
            }
        }
    }
}
