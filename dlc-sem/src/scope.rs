//! Name resolution scopes (spec.md §4.3 pass 1, GLOSSARY "Scope").
//!
//! A persistent arena of ribs linked by parent pointers, rather than a plain
//! `Vec` stack, so a [`RibId`] captured while resolving one subtree (e.g. a
//! function body analyzed after its enclosing block's `seq`) stays valid
//! even after the scope that created it has been "exited" by its caller.
//! This language has no modules or loops, so there is only one rib kind,
//! and a `Rib` binds a [`Binding`] (variable or function) directly.

use dlc_util::{Idx, IndexVec, NodeId, Symbol};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RibId(u32);

impl Idx for RibId {
    fn from_usize(idx: usize) -> Self {
        RibId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name in scope refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// An ordinary value binding (function parameter or `let`-bound name).
    Var,
    /// A name a block's `seq` will bind later in execution order, made
    /// visible now so function bodies can forward-reference it lexically
    /// (spec.md scenario 7). Resolves successfully when reached while
    /// computing a function's environment, but is rejected as undefined
    /// when reached by ordinary, positional `seq` evaluation — upgraded to
    /// `Var` the moment its real binding occurrence is processed.
    PendingVar,
    /// A function declared by this block's `defs`, identified by the
    /// [`NodeId`] of its first clause — the key the closure pass
    /// (`resolve::Resolver::ensure_env`) uses to look up and memoize its
    /// transitive environment.
    Func(NodeId),
}

#[derive(Debug)]
pub struct Rib {
    bindings: FxHashMap<Symbol, Binding>,
    parent: Option<RibId>,
}

/// A stack of nested scopes, innermost last.
#[derive(Debug)]
pub struct ScopeTree {
    ribs: IndexVec<RibId, Rib>,
    current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib {
            bindings: FxHashMap::default(),
            parent: None,
        });
        Self { ribs, current: root }
    }

    pub fn enter_scope(&mut self) -> RibId {
        let rib = self.ribs.push(Rib {
            bindings: FxHashMap::default(),
            parent: Some(self.current),
        });
        self.current = rib;
        rib
    }

    /// Restores the current rib to `rib`'s parent. Callers must pass the
    /// `RibId` returned by the matching [`enter_scope`], not assume a plain
    /// push/pop stack discipline — the arena keeps exited ribs alive so
    /// [`resolve_from`] can still walk them.
    pub fn exit_scope(&mut self, rib: RibId) {
        self.current = self.ribs[rib].parent.unwrap_or(rib);
    }

    pub fn current_rib(&self) -> RibId {
        self.current
    }

    pub fn bind(&mut self, name: Symbol, binding: Binding) {
        self.ribs[self.current].bindings.insert(name, binding);
    }

    pub fn bind_in(&mut self, rib: RibId, name: Symbol, binding: Binding) {
        self.ribs[rib].bindings.insert(name, binding);
    }

    /// Looks up `name` starting at the current rib.
    pub fn resolve(&self, name: Symbol) -> Option<Binding> {
        self.resolve_from(self.current, name)
    }

    pub fn resolve_from(&self, rib: RibId, name: Symbol) -> Option<Binding> {
        let mut rib_id = rib;
        loop {
            let r = &self.ribs[rib_id];
            if let Some(binding) = r.bindings.get(&name) {
                return Some(*binding);
            }
            match r.parent {
                Some(parent) => rib_id = parent,
                None => return None,
            }
        }
    }

    /// True if `name` is bound in `rib` itself, without walking to parents —
    /// used to decide whether a pattern occurrence shadows (access) or
    /// introduces (bind) a name local to the block currently being resolved.
    pub fn is_bound_locally(&self, rib: RibId, name: Symbol) -> bool {
        self.ribs[rib].bindings.contains_key(&name)
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_through_parent_ribs() {
        let mut tree = ScopeTree::new();
        let x = Symbol::intern("x");
        tree.bind(x, Binding::Var);
        tree.enter_scope();
        assert_eq!(tree.resolve(x), Some(Binding::Var));
    }

    #[test]
    fn inner_binding_does_not_leak_to_parent() {
        let mut tree = ScopeTree::new();
        let y = Symbol::intern("y");
        let inner = tree.enter_scope();
        tree.bind(y, Binding::Var);
        tree.exit_scope(inner);
        assert_eq!(tree.resolve(y), None);
    }

    #[test]
    fn exited_rib_remains_resolvable_directly() {
        let mut tree = ScopeTree::new();
        let z = Symbol::intern("z");
        let inner = tree.enter_scope();
        tree.bind(z, Binding::Var);
        tree.exit_scope(inner);
        assert_eq!(tree.resolve_from(inner, z), Some(Binding::Var));
    }
}
