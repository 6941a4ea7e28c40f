//! The varset algebra (spec.md §4.3 "varset algebra", GLOSSARY "Varset").
//!
//! A varset is a mapping from variable name to the *kind* of access the
//! enclosing subtree makes to it. Unlike [`crate::Action`], which is a
//! per-occurrence annotation attached to a single `var` node, a varset is
//! attached to every expression-bearing node and summarizes the free
//! variables of the whole subtree rooted there.

use dlc_util::Symbol;
use indexmap::IndexMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    Bind,
    Access,
}

impl VarKind {
    /// `bind ⊔ bind = bind`, otherwise `access` (spec.md §4.3).
    fn union(self, other: VarKind) -> VarKind {
        match (self, other) {
            (VarKind::Bind, VarKind::Bind) => VarKind::Bind,
            _ => VarKind::Access,
        }
    }
}

/// Ordered like `dlc_par::ast::Block::defs`: deterministic iteration makes
/// diagnostics (e.g. which unused variable gets warned about first) and
/// tests reproducible.
pub type VarSet = IndexMap<Symbol, VarKind>;

pub fn singleton(name: Symbol, kind: VarKind) -> VarSet {
    let mut set = VarSet::new();
    set.insert(name, kind);
    set
}

/// Merges two varsets under the lattice in [`VarKind::union`].
pub fn union(mut a: VarSet, b: VarSet) -> VarSet {
    for (name, kind) in b {
        a.entry(name)
            .and_modify(|existing| *existing = existing.union(kind))
            .or_insert(kind);
    }
    a
}

pub fn union_all(sets: impl IntoIterator<Item = VarSet>) -> VarSet {
    sets.into_iter().fold(VarSet::new(), union)
}

/// Removes names leaving scope (spec.md §4.3: "Set difference... is applied
/// whenever control leaves a scope").
pub fn diff(mut set: VarSet, leaving: impl IntoIterator<Item = Symbol>) -> VarSet {
    for name in leaving {
        set.shift_remove(&name);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlc_util::Symbol;

    #[test]
    fn union_upgrades_bind_bind_to_bind_only_when_both_bind() {
        let x = Symbol::intern("x");
        let a = singleton(x, VarKind::Bind);
        let b = singleton(x, VarKind::Bind);
        assert_eq!(union(a, b)[&x], VarKind::Bind);
    }

    #[test]
    fn union_upgrades_mixed_to_access() {
        let x = Symbol::intern("x");
        let a = singleton(x, VarKind::Bind);
        let b = singleton(x, VarKind::Access);
        assert_eq!(union(a, b)[&x], VarKind::Access);
    }

    #[test]
    fn diff_removes_names_leaving_scope() {
        let x = Symbol::intern("x");
        let y = Symbol::intern("y");
        let mut set = VarSet::new();
        set.insert(x, VarKind::Access);
        set.insert(y, VarKind::Access);
        let result = diff(set, [x]);
        assert!(!result.contains_key(&x));
        assert!(result.contains_key(&y));
    }
}
