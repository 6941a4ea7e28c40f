//! Scope resolution, closure-environment computation, and first/last-access
//! marking over a parsed [`dlc_par::ast::Ast`] (spec.md §4.3 "Annotator").
//!
//! `annotate` makes three logical passes, interleaved by structural
//! recursion exactly as spec.md describes:
//!
//! 1. **Scope resolution** (`resolve`) — every `var` is resolved against a
//!    stack of [`scope::ScopeTree`] ribs; a block's function names are
//!    pre-declared so mutual recursion works, and a function body may refer
//!    to a variable its enclosing block will only bind later in `seq`
//!    (spec.md scenario 7), while a direct access at the wrong point in
//!    `seq`'s execution order is rejected.
//! 2. **Closure environment computation** is folded into pass 1: the first
//!    time a function is referenced, the resolver walks its clause bodies
//!    and memoizes the transitively-closed free-variable set, breaking
//!    cycles through (mutual) recursion the same way
//!    `original_source/di_annotate.c`'s `get_rec_accessed_varset` does.
//! 3. **First/last-access marking** (`marking`) runs once scope resolution
//!    has produced a varset for every node, walking each scope's bound
//!    names backward (last access) then forward (first access).
//!
//! Unlike the lexer and parser, the annotator has no single obvious "main
//! loop" — its passes share state (the scope stack, the memoized
//! environment table) that doesn't fit one function, so the implementation
//! is split across `scope`, `varset`, `action`, `resolve`, `pattern`, and
//! `marking` rather than being one big recursive match.

mod action;
mod error;
mod marking;
mod pattern;
mod resolve;
mod scope;
mod varset;

pub use action::Action;
pub use error::SemError;
pub use varset::{VarKind, VarSet};

use dlc_par::ast::Ast;
use dlc_util::{Diagnostic, FxHashMap, NodeId};

/// The side table the annotator produces (spec.md §9 Design Notes: rather
/// than mutating the AST in place, `varset`/`action`/`env` live in a table
/// keyed by [`NodeId`]).
#[derive(Debug, Default)]
pub struct Annotations {
    actions: FxHashMap<NodeId, Action>,
    varsets: FxHashMap<NodeId, VarSet>,
    envs: FxHashMap<NodeId, VarSet>,
    warnings: Vec<Diagnostic>,
}

impl Annotations {
    fn new() -> Self {
        Self::default()
    }

    /// The `action` of a `var` node, if it has been annotated.
    pub fn action(&self, id: NodeId) -> Option<Action> {
        self.actions.get(&id).copied()
    }

    /// The free-variable set of any expression-bearing node.
    pub fn varset(&self, id: NodeId) -> Option<&VarSet> {
        self.varsets.get(&id)
    }

    /// A function definition's captured environment, keyed by the
    /// [`NodeId`] of its first clause (`dlc_par::ast::FuncDef`'s doc
    /// comment: "`env`... is filled in... as a side-table entry keyed by
    /// the definition's first clause id").
    pub fn env(&self, rep_id: NodeId) -> Option<&VarSet> {
        self.envs.get(&rep_id)
    }

    /// Non-fatal unused-binding warnings (spec.md §7: "non-fatal, printed
    /// to stdout, compilation continues").
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    fn set_action(&mut self, id: NodeId, action: Action) {
        self.actions.insert(id, action);
    }

    fn set_varset(&mut self, id: NodeId, varset: VarSet) {
        self.varsets.insert(id, varset);
    }

    fn set_env(&mut self, rep_id: NodeId, varset: VarSet) {
        self.envs.insert(rep_id, varset);
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }
}

/// Runs all three annotation passes over a parsed program.
///
/// `ast` is the `do` node `dlc_par::parse` returns (the implicit top-level
/// block). Returns on the first error; there is no recovery (spec.md §7).
pub fn annotate(ast: &Ast) -> Result<Annotations, SemError> {
    let mut annotations = Annotations::new();
    let mut resolver = resolve::Resolver::new(&mut annotations);
    resolver.resolve_top_level(ast)?;
    marking::mark(ast, &mut annotations);
    Ok(annotations)
}
