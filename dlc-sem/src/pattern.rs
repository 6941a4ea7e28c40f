//! Helpers shared between scope resolution and access marking for walking a
//! pattern's shape without re-deriving binding semantics twice.
//!
//! `dlc-par/src/pattern.rs` already guarantees (at parse time) that a
//! pattern only contains `var | lit | regex | array | dict | dictup | @ | ~
//! | =` nodes — this module never has to reject anything, only collect.

use dlc_par::ast::{DictEntry, Node, NodeKind};
use dlc_util::Symbol;

/// Collects every `var` leaf appearing in a pattern, in left-to-right
/// textual order, skipping the bare wildcard `_` — `original_source/
/// di_annotate.c`'s `pattern()` returns early for it ("match-all, no
/// variable is bound"). Underscore-*prefixed* names (`_foo`) still bind
/// normally; they only suppress the unused-variable warning later.
pub fn collect_pattern_vars<'a>(pat: &'a Node, out: &mut Vec<&'a Node>) {
    match &pat.kind {
        NodeKind::Var(name) => {
            if *name != Symbol::KW_UNDERSCORE {
                out.push(pat);
            }
        }
        NodeKind::Lit(_) | NodeKind::Regex(_) => {}
        NodeKind::Array(elems) => {
            for elem in elems {
                collect_pattern_vars(elem, out);
            }
        }
        NodeKind::Dict(entries) | NodeKind::DictUp { entries, .. } => {
            collect_dict_entries(entries, out);
        }
        NodeKind::Binary { left, right, .. } => {
            collect_pattern_vars(left, out);
            collect_pattern_vars(right, out);
        }
        // Not pattern-legal; dlc-par's validator rejects these before the
        // annotator ever sees a pattern.
        NodeKind::Apply { .. }
        | NodeKind::If { .. }
        | NodeKind::Case { .. }
        | NodeKind::Do(_)
        | NodeKind::Unary { .. } => {}
    }
}

fn collect_dict_entries<'a>(entries: &'a [DictEntry], out: &mut Vec<&'a Node>) {
    for entry in entries {
        collect_pattern_vars(&entry.key, out);
        collect_pattern_vars(&entry.value, out);
    }
}

/// Whether an unused binding of `name` should be silenced (spec.md §4.3
/// pass 3: "a warning is emitted unless the name starts with `_`").
pub fn is_warning_exempt(name: Symbol) -> bool {
    name.as_str().starts_with('_')
}
