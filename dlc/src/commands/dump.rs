//! Verbatim AST dump for `dlc parse` (spec.md §6 "the `parse` command dumps
//! the AST verbatim"). Renders each node as a `{syntax, line, column, ...}`
//! dict, matching the shape spec.md §3's AST node table describes, rather
//! than Rust's `#[derive(Debug)]` output.

use std::fmt::Write as _;

use dlc_par::ast::{BinOp, Block, Clause, DictEntry, FuncDef, Node, NodeKind, UnOp};

pub fn dump_ast(node: &Node) -> String {
    let mut out = String::new();
    dump_node(&mut out, node);
    out
}

fn dump_node(out: &mut String, node: &Node) {
    let _ = write!(out, "{{line: {}, column: {}, ", node.span.line, node.span.column);
    match &node.kind {
        NodeKind::Lit(v) => {
            let _ = write!(out, "syntax: \"lit\", value: {}}}", dlc_value::pretty_print(v));
        }
        NodeKind::Var(name) => {
            let _ = write!(out, "syntax: \"var\", name: {:?}}}", name.as_str());
        }
        NodeKind::Regex(pattern) => {
            let _ = write!(out, "syntax: \"regex\", regex: {pattern:?}}}");
        }
        NodeKind::Array(elems) => {
            out.push_str("syntax: \"array\", elems: [");
            dump_list(out, elems, dump_node);
            out.push_str("]}");
        }
        NodeKind::Dict(entries) => {
            out.push_str("syntax: \"dict\", entries: [");
            dump_list(out, entries, dump_entry);
            out.push_str("]}");
        }
        NodeKind::DictUp { subj, entries } => {
            out.push_str("syntax: \"dictup\", subj: ");
            dump_node(out, subj);
            out.push_str(", entries: [");
            dump_list(out, entries, dump_entry);
            out.push_str("]}");
        }
        NodeKind::Apply { func, args } => {
            out.push_str("syntax: \"apply\", func: ");
            dump_node(out, func);
            out.push_str(", args: [");
            dump_list(out, args, dump_node);
            out.push_str("]}");
        }
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            out.push_str("syntax: \"if\", cond: ");
            dump_node(out, cond);
            out.push_str(", then: ");
            dump_node(out, then_branch);
            out.push_str(", else: ");
            dump_node(out, else_branch);
            out.push('}');
        }
        NodeKind::Case { subj, clauses } => {
            out.push_str("syntax: \"case\", subj: ");
            dump_node(out, subj);
            out.push_str(", clauses: [");
            dump_list(out, clauses, dump_clause);
            out.push_str("]}");
        }
        NodeKind::Do(block) => {
            out.push_str("syntax: \"do\", ");
            dump_block(out, block);
            out.push('}');
        }
        NodeKind::Unary { op, right } => {
            let _ = write!(out, "syntax: {:?}, right: ", unop_str(*op));
            dump_node(out, right);
            out.push('}');
        }
        NodeKind::Binary { op, left, right } => {
            let _ = write!(out, "syntax: {:?}, left: ", binop_str(*op));
            dump_node(out, left);
            out.push_str(", right: ");
            dump_node(out, right);
            out.push('}');
        }
    }
}

fn dump_block(out: &mut String, block: &Block) {
    out.push_str("seq: [");
    dump_list(out, &block.seq, dump_node);
    out.push_str("], defs: {");
    for (i, def) in block.defs.values().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{:?}: ", def.name.as_str());
        dump_func_def(out, def);
    }
    out.push('}');
}

fn dump_func_def(out: &mut String, def: &FuncDef) {
    let _ = write!(out, "{{name: {:?}, arity: {}, clauses: [", def.name.as_str(), def.arity);
    dump_list(out, &def.clauses, dump_clause);
    out.push_str("]}");
}

fn dump_clause(out: &mut String, clause: &Clause) {
    let _ = write!(out, "{{syntax: \"clause\", line: {}, column: {}, pats: [", clause.span.line, clause.span.column);
    dump_list(out, &clause.pats, dump_node);
    out.push_str("], body: ");
    dump_node(out, &clause.body);
    out.push('}');
}

fn dump_entry(out: &mut String, entry: &DictEntry) {
    out.push_str("{syntax: \"entry\", key: ");
    dump_node(out, &entry.key);
    out.push_str(", value: ");
    dump_node(out, &entry.value);
    out.push('}');
}

fn dump_list<T>(out: &mut String, items: &[T], mut f: impl FnMut(&mut String, &T)) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        f(out, item);
    }
}

fn unop_str(op: UnOp) -> &'static str {
    match op {
        UnOp::Neg => "-",
        UnOp::Not => "not",
    }
}

fn binop_str(op: BinOp) -> &'static str {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumps_integer_literal() {
        let ast = dlc_par::parse("42").unwrap();
        let dumped = dump_ast(&ast);
        assert!(dumped.contains("\"do\""));
        assert!(dumped.contains("\"lit\""));
        assert!(dumped.contains("value: 42"));
    }

    #[test]
    fn dumps_binary_expression_with_both_operands() {
        let ast = dlc_par::parse("1 + 2").unwrap();
        let dumped = dump_ast(&ast);
        assert!(dumped.contains("\"+\""));
        assert!(dumped.contains("left:"));
        assert!(dumped.contains("right:"));
    }
}
