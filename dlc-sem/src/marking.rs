//! First/last-access marking: the third annotator pass.
//!
//! Scope resolution (`resolve`) has already computed, for every
//! expression-bearing node, the free variables it references; this pass
//! revisits each scope (a `do` block's `seq`, or a clause body, whether
//! from a `case` or a function definition) and decides, for each name that
//! scope itself binds, which occurrence is the last use, which is the
//! first, and whether there is any use at all.
//!
//! A block's own bound names are only ever searched for within its `seq`;
//! a function definition living in that block's `defs` is its own separate
//! scope and is not descended into from here (its free variables are
//! already folded into the enclosing block through the captured
//! environment computed in `resolve::Resolver::ensure_env`). Symmetrically,
//! a `case` clause's search is restricted to its `body` — a name compared
//! against inside the clause's own pattern (e.g. `~x` matching an
//! already-bound outer `x`) is resolved correctly but is not a candidate
//! for last/first marking, a conservative limitation shared with the
//! block-vs-`defs` one above (see DESIGN.md).

use crate::pattern::{collect_pattern_vars, is_warning_exempt};
use crate::{Action, Annotations};
use dlc_par::ast::{BinOp, Block, Clause, DictEntry, Node, NodeKind};
use dlc_util::{Diagnostic, DiagnosticCode, NodeId, Span, Symbol};

pub fn mark(ast: &Node, annotations: &mut Annotations) {
    mark_node(ast, annotations);
}

/// Recurses through the whole tree, marking every scope it finds along the
/// way (nested `do` blocks, `case` clauses, function clauses).
fn mark_node(node: &Node, annotations: &mut Annotations) {
    match &node.kind {
        NodeKind::Lit(_) | NodeKind::Var(_) | NodeKind::Regex(_) => {}
        NodeKind::Array(elems) => {
            for elem in elems {
                mark_node(elem, annotations);
            }
        }
        NodeKind::Dict(entries) => mark_dict_entries(entries, annotations),
        NodeKind::DictUp { subj, entries } => {
            mark_node(subj, annotations);
            mark_dict_entries(entries, annotations);
        }
        NodeKind::Apply { func, args } => {
            mark_node(func, annotations);
            for arg in args {
                mark_node(arg, annotations);
            }
        }
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            mark_node(cond, annotations);
            mark_node(then_branch, annotations);
            mark_node(else_branch, annotations);
        }
        NodeKind::Case { subj, clauses } => {
            mark_node(subj, annotations);
            for clause in clauses {
                mark_clause(clause, annotations);
            }
        }
        NodeKind::Do(block) => mark_block(block, annotations),
        NodeKind::Unary { right, .. } => mark_node(right, annotations),
        NodeKind::Binary { left, right, .. } => {
            mark_node(left, annotations);
            mark_node(right, annotations);
        }
    }
}

fn mark_dict_entries(entries: &[DictEntry], annotations: &mut Annotations) {
    for entry in entries {
        mark_node(&entry.key, annotations);
        mark_node(&entry.value, annotations);
    }
}

fn mark_block(block: &Block, annotations: &mut Annotations) {
    for item in &block.seq {
        mark_node(item, annotations);
    }
    for funcdef in block.defs.values() {
        for clause in &funcdef.clauses {
            mark_clause(clause, annotations);
        }
    }

    let mut leaves = Vec::new();
    for item in &block.seq {
        if let NodeKind::Binary {
            op: BinOp::Eq,
            left,
            ..
        } = &item.kind
        {
            collect_pattern_vars(left, &mut leaves);
        }
    }
    let bound = bound_names(leaves, annotations);
    let items: Vec<&Node> = block.seq.iter().collect();
    mark_scope(&bound, &items, annotations);
}

fn mark_clause(clause: &Clause, annotations: &mut Annotations) {
    mark_node(&clause.body, annotations);

    let mut leaves = Vec::new();
    for pat in &clause.pats {
        collect_pattern_vars(pat, &mut leaves);
    }
    let bound = bound_names(leaves, annotations);
    mark_scope(&bound, &[&clause.body], annotations);
}

/// Keeps only the leaves this scope actually introduced — a pattern
/// occurrence of a name already bound further out resolves to `Access`
/// (spec: "treated as a comparison"), not `Bind`, and is someone else's
/// binding to mark, not this scope's.
fn bound_names(leaves: Vec<&Node>, annotations: &Annotations) -> Vec<(Symbol, NodeId, Span)> {
    leaves
        .into_iter()
        .filter_map(|leaf| {
            let NodeKind::Var(name) = leaf.kind else {
                return None;
            };
            match annotations.action(leaf.id) {
                Some(Action::Bind) => Some((name, leaf.id, leaf.span)),
                _ => None,
            }
        })
        .collect()
}

fn mark_scope(bound: &[(Symbol, NodeId, Span)], items: &[&Node], annotations: &mut Annotations) {
    for &(name, bind_id, span) in bound {
        let last = find_last(items, name, annotations);
        let first = find_first(items, name, annotations);
        match (first, last) {
            (None, None) => {
                annotations.set_action(bind_id, Action::Discard);
                if !is_warning_exempt(name) {
                    annotations.warn(
                        Diagnostic::warning(format!("Unused variable '{name}'"), span)
                            .with_code(DiagnosticCode::W_UNUSED_VARIABLE),
                    );
                }
            }
            (Some(only), Some(last)) if only == last => {
                annotations.set_action(only, Action::Only);
            }
            (Some(first), Some(last)) => {
                annotations.set_action(first, Action::First);
                annotations.set_action(last, Action::Last);
            }
            (None, Some(_)) | (Some(_), None) => {
                unreachable!("first and last access must agree on whether any access exists")
            }
        }
    }
}

fn find_last(items: &[&Node], name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    items.iter().rev().find_map(|item| find_last_in_node(item, name, annotations))
}

fn find_first(items: &[&Node], name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    items.iter().find_map(|item| find_first_in_node(item, name, annotations))
}

/// Finds the textually *last* `Access` occurrence of `name` within `node`,
/// recursing into children in reverse textual order (right before left,
/// `else` before `then` before `cond`, last clause before `subj`, …).
fn find_last_in_node(node: &Node, name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    match &node.kind {
        NodeKind::Var(n) => {
            if *n == name && annotations.action(node.id) == Some(Action::Access) {
                Some(node.id)
            } else {
                None
            }
        }
        NodeKind::Lit(_) | NodeKind::Regex(_) => None,
        NodeKind::Array(elems) => elems.iter().rev().find_map(|e| find_last_in_node(e, name, annotations)),
        NodeKind::Dict(entries) => find_last_in_entries(entries, name, annotations),
        NodeKind::DictUp { subj, entries } => find_last_in_entries(entries, name, annotations)
            .or_else(|| find_last_in_node(subj, name, annotations)),
        NodeKind::Apply { func, args } => args
            .iter()
            .rev()
            .find_map(|a| find_last_in_node(a, name, annotations))
            .or_else(|| find_last_in_node(func, name, annotations)),
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => find_last_in_node(else_branch, name, annotations)
            .or_else(|| find_last_in_node(then_branch, name, annotations))
            .or_else(|| find_last_in_node(cond, name, annotations)),
        NodeKind::Case { subj, clauses } => clauses
            .iter()
            .rev()
            .find_map(|c| find_last_in_node(&c.body, name, annotations))
            .or_else(|| find_last_in_node(subj, name, annotations)),
        NodeKind::Do(block) => block
            .seq
            .iter()
            .rev()
            .find_map(|item| find_last_in_node(item, name, annotations)),
        NodeKind::Unary { right, .. } => find_last_in_node(right, name, annotations),
        NodeKind::Binary { left, right, .. } => find_last_in_node(right, name, annotations)
            .or_else(|| find_last_in_node(left, name, annotations)),
    }
}

fn find_last_in_entries(entries: &[DictEntry], name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    entries.iter().rev().find_map(|entry| {
        find_last_in_node(&entry.value, name, annotations)
            .or_else(|| find_last_in_node(&entry.key, name, annotations))
    })
}

/// The dual of [`find_last_in_node`]: textually *first* `Access` occurrence,
/// recursing forward.
fn find_first_in_node(node: &Node, name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    match &node.kind {
        NodeKind::Var(n) => {
            if *n == name && annotations.action(node.id) == Some(Action::Access) {
                Some(node.id)
            } else {
                None
            }
        }
        NodeKind::Lit(_) | NodeKind::Regex(_) => None,
        NodeKind::Array(elems) => elems.iter().find_map(|e| find_first_in_node(e, name, annotations)),
        NodeKind::Dict(entries) => find_first_in_entries(entries, name, annotations),
        NodeKind::DictUp { subj, entries } => find_first_in_node(subj, name, annotations)
            .or_else(|| find_first_in_entries(entries, name, annotations)),
        NodeKind::Apply { func, args } => find_first_in_node(func, name, annotations)
            .or_else(|| args.iter().find_map(|a| find_first_in_node(a, name, annotations))),
        NodeKind::If {
            cond,
            then_branch,
            else_branch,
        } => find_first_in_node(cond, name, annotations)
            .or_else(|| find_first_in_node(then_branch, name, annotations))
            .or_else(|| find_first_in_node(else_branch, name, annotations)),
        NodeKind::Case { subj, clauses } => find_first_in_node(subj, name, annotations)
            .or_else(|| clauses.iter().find_map(|c| find_first_in_node(&c.body, name, annotations))),
        NodeKind::Do(block) => block
            .seq
            .iter()
            .find_map(|item| find_first_in_node(item, name, annotations)),
        NodeKind::Unary { right, .. } => find_first_in_node(right, name, annotations),
        NodeKind::Binary { left, right, .. } => find_first_in_node(left, name, annotations)
            .or_else(|| find_first_in_node(right, name, annotations)),
    }
}

fn find_first_in_entries(entries: &[DictEntry], name: Symbol, annotations: &Annotations) -> Option<NodeId> {
    entries.iter().find_map(|entry| {
        find_first_in_node(&entry.key, name, annotations)
            .or_else(|| find_first_in_node(&entry.value, name, annotations))
    })
}

#[cfg(test)]
mod tests {
    use crate::annotate;
    use crate::Action;
    use dlc_par::ast::NodeKind;
    use dlc_par::parse;

    fn var_actions(source: &str, name: &str) -> Vec<Action> {
        let ast = parse(source).unwrap();
        let annotations = annotate(&ast).unwrap();
        let mut actions = Vec::new();
        collect_var_actions(&ast, name, &annotations, &mut actions);
        actions
    }

    fn collect_var_actions(
        node: &dlc_par::ast::Node,
        name: &str,
        annotations: &crate::Annotations,
        out: &mut Vec<Action>,
    ) {
        if let NodeKind::Var(n) = &node.kind {
            if n.as_str() == name {
                if let Some(action) = annotations.action(node.id) {
                    out.push(action);
                }
            }
        }
        walk_children(node, name, annotations, out);
    }

    fn walk_children(
        node: &dlc_par::ast::Node,
        name: &str,
        annotations: &crate::Annotations,
        out: &mut Vec<Action>,
    ) {
        match &node.kind {
            NodeKind::Array(elems) => {
                for e in elems {
                    collect_var_actions(e, name, annotations, out);
                }
            }
            NodeKind::Dict(entries) | NodeKind::DictUp { entries, .. } => {
                if let NodeKind::DictUp { subj, .. } = &node.kind {
                    collect_var_actions(subj, name, annotations, out);
                }
                for entry in entries {
                    collect_var_actions(&entry.key, name, annotations, out);
                    collect_var_actions(&entry.value, name, annotations, out);
                }
            }
            NodeKind::Apply { func, args } => {
                collect_var_actions(func, name, annotations, out);
                for a in args {
                    collect_var_actions(a, name, annotations, out);
                }
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                collect_var_actions(cond, name, annotations, out);
                collect_var_actions(then_branch, name, annotations, out);
                collect_var_actions(else_branch, name, annotations, out);
            }
            NodeKind::Case { subj, clauses } => {
                collect_var_actions(subj, name, annotations, out);
                for c in clauses {
                    for p in &c.pats {
                        collect_var_actions(p, name, annotations, out);
                    }
                    collect_var_actions(&c.body, name, annotations, out);
                }
            }
            NodeKind::Do(block) => {
                for item in &block.seq {
                    collect_var_actions(item, name, annotations, out);
                }
                for funcdef in block.defs.values() {
                    for c in &funcdef.clauses {
                        for p in &c.pats {
                            collect_var_actions(p, name, annotations, out);
                        }
                        collect_var_actions(&c.body, name, annotations, out);
                    }
                }
            }
            NodeKind::Unary { right, .. } => collect_var_actions(right, name, annotations, out),
            NodeKind::Binary { left, right, .. } => {
                collect_var_actions(left, name, annotations, out);
                collect_var_actions(right, name, annotations, out);
            }
            NodeKind::Lit(_) | NodeKind::Regex(_) | NodeKind::Var(_) => {}
        }
    }

    #[test]
    fn unused_binding_becomes_discard() {
        let actions = var_actions("x = 1\n2", "x");
        assert_eq!(actions, vec![Action::Discard]);
    }

    #[test]
    fn single_access_becomes_only() {
        let actions = var_actions("x = 1\nx", "x");
        assert_eq!(actions, vec![Action::Bind, Action::Only]);
    }

    #[test]
    fn two_accesses_mark_first_and_last() {
        let actions = var_actions("x = 1\nx + x", "x");
        assert_eq!(actions, vec![Action::Bind, Action::First, Action::Last]);
    }

    #[test]
    fn three_accesses_mark_middle_as_plain_access() {
        let actions = var_actions("x = 1\nx + x + x", "x");
        assert_eq!(actions, vec![Action::Bind, Action::First, Action::Access, Action::Last]);
    }

    #[test]
    fn underscore_prefixed_unused_binding_is_still_discard() {
        let actions = var_actions("_ignored = 1\n2", "_ignored");
        assert_eq!(actions, vec![Action::Discard]);
    }

    #[test]
    fn unused_binding_emits_warning_unless_underscore_prefixed() {
        let ast = parse("x = 1\n2").unwrap();
        let annotations = annotate(&ast).unwrap();
        assert_eq!(annotations.warnings().len(), 1);
        assert!(annotations.warnings()[0].message.contains("x"));

        let ast = parse("_x = 1\n2").unwrap();
        let annotations = annotate(&ast).unwrap();
        assert!(annotations.warnings().is_empty());
    }

    #[test]
    fn function_parameter_lifetime_is_marked_independently_of_caller_scope() {
        let ast = parse("double(n) = n + n\ndouble(21)").unwrap();
        let annotations = annotate(&ast).unwrap();
        let NodeKind::Do(block) = &ast.kind else { panic!() };
        let funcdef = &block.defs[&dlc_util::Symbol::intern("double")];
        let clause = &funcdef.clauses[0];
        let mut actions = Vec::new();
        collect_var_actions(&clause.body, "n", &annotations, &mut actions);
        assert_eq!(actions, vec![Action::First, Action::Last]);
    }
}
