//! Scope resolution and closure-environment computation (spec.md §4.3
//! passes 1 and 2).
//!
//! A `do` block resolves in three steps:
//!
//! 1. Pre-declare this block's function names, and pre-declare (as
//!    [`Binding::PendingVar`]) every plain name its `seq` will bind later,
//!    unless an enclosing scope already binds that name — this is what
//!    lets a function body forward-reference a variable bound further down
//!    the same block (spec.md scenario 7).
//! 2. Resolve `seq` in textual order. A plain access finds its name
//!    resolved as soon as the matching `=` form has run; a function call
//!    triggers [`Resolver::ensure_env`] (lazily computing and memoizing
//!    that function's transitive environment the first time it's needed)
//!    and then checks every captured name against the *current* point in
//!    `seq` — this is the "access before bound" check spec.md scenario 7
//!    exercises.
//! 3. Resolve every local function not already forced by step 2, so every
//!    definition gets analyzed even if this block's own `seq` never calls
//!    it.
//!
//! The positional check in step 2 only applies at `in_func_body_depth ==
//! 0`: inside a function body, a reference to a not-yet-bound name is fine
//! (the call happens later, after `seq` has finished), matching
//! `original_source/di_annotate.c`'s distinction between resolving a block's
//! `seq` and resolving a `defs` clause body.

use crate::pattern::collect_pattern_vars;
use crate::scope::{Binding, ScopeTree};
use crate::{varset, Action, Annotations, SemError, VarKind, VarSet};
use dlc_par::ast::{BinOp, Block, DictEntry, FuncDef, Node, NodeKind};
use dlc_util::{FxHashMap, FxHashSet, NodeId, Span, Symbol};

pub struct Resolver<'ast, 'ann> {
    scope: ScopeTree,
    annotations: &'ann mut Annotations,
    /// Every function definition seen so far, keyed by its first clause's
    /// id — `ensure_env` looks a callee up here regardless of how deeply
    /// nested the reference is relative to where the definition lives.
    func_table: FxHashMap<NodeId, &'ast FuncDef>,
    /// Functions whose environment is currently being computed, to break
    /// cycles through (mutual) recursion — the self/mutual-recursion
    /// contribution is treated as empty, mirroring
    /// `original_source/di_annotate.c`'s `get_rec_accessed_varset`. This is
    /// memoized recursion, not a worklist fixed point (see DESIGN.md): it
    /// is exact for the self-recursive case spec.md scenario 3 exercises,
    /// and may under-approximate a function's environment in deeper mutual
    /// recursion between functions that each capture different free
    /// variables, a limitation spec.md §9 attributes to the reference
    /// implementation too.
    computing: FxHashSet<NodeId>,
    /// Nonzero while resolving a function's clause body through
    /// `ensure_env`; suppresses the "accessed before bound" positional
    /// check, which only makes sense for code that runs as part of `seq`.
    in_func_body_depth: u32,
}

impl<'ast, 'ann> Resolver<'ast, 'ann> {
    pub fn new(annotations: &'ann mut Annotations) -> Self {
        Self {
            scope: ScopeTree::new(),
            annotations,
            func_table: FxHashMap::default(),
            computing: FxHashSet::default(),
            in_func_body_depth: 0,
        }
    }

    pub fn resolve_top_level(&mut self, ast: &'ast Node) -> Result<(), SemError> {
        self.resolve_expr(ast)?;
        Ok(())
    }

    fn resolve_expr(&mut self, node: &'ast Node) -> Result<VarSet, SemError> {
        let varset = match &node.kind {
            NodeKind::Lit(_) | NodeKind::Regex(_) => VarSet::new(),
            NodeKind::Var(name) => self.resolve_var_access(*name, node.id, node.span)?,
            NodeKind::Array(elems) => self.resolve_expr_seq(elems.iter())?,
            NodeKind::Dict(entries) => self.resolve_dict_entries_expr(entries)?,
            NodeKind::DictUp { subj, entries } => {
                let mut vs = self.resolve_expr(subj)?;
                vs = varset::union(vs, self.resolve_dict_entries_expr(entries)?);
                vs
            }
            NodeKind::Apply { func, args } => {
                let mut vs = self.resolve_expr(func)?;
                vs = varset::union(vs, self.resolve_expr_seq(args.iter())?);
                vs
            }
            NodeKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut vs = self.resolve_expr(cond)?;
                vs = varset::union(vs, self.resolve_expr(then_branch)?);
                vs = varset::union(vs, self.resolve_expr(else_branch)?);
                vs
            }
            NodeKind::Case { subj, clauses } => {
                let mut vs = self.resolve_expr(subj)?;
                for clause in clauses {
                    vs = varset::union(vs, self.resolve_case_clause(clause)?);
                }
                vs
            }
            NodeKind::Do(block) => self.resolve_block(node.id, block)?,
            NodeKind::Unary { right, .. } => self.resolve_expr(right)?,
            NodeKind::Binary { left, right, .. } => {
                let mut vs = self.resolve_expr(left)?;
                vs = varset::union(vs, self.resolve_expr(right)?);
                vs
            }
        };
        self.annotations.set_varset(node.id, varset.clone());
        Ok(varset)
    }

    fn resolve_expr_seq<'n>(
        &mut self,
        nodes: impl Iterator<Item = &'n Node>,
    ) -> Result<VarSet, SemError>
    where
        'ast: 'n,
    {
        let mut vs = VarSet::new();
        for n in nodes {
            vs = varset::union(vs, self.resolve_expr(n)?);
        }
        Ok(vs)
    }

    fn resolve_dict_entries_expr(&mut self, entries: &'ast [DictEntry]) -> Result<VarSet, SemError> {
        let mut vs = VarSet::new();
        for entry in entries {
            vs = varset::union(vs, self.resolve_expr(&entry.key)?);
            vs = varset::union(vs, self.resolve_expr(&entry.value)?);
        }
        Ok(vs)
    }

    fn resolve_var_access(
        &mut self,
        name: Symbol,
        id: NodeId,
        span: Span,
    ) -> Result<VarSet, SemError> {
        match self.scope.resolve(name) {
            Some(Binding::Func(rep_id)) => {
                let env = self.ensure_env(rep_id)?;
                if self.in_func_body_depth == 0 {
                    self.check_env_available(&env, span)?;
                }
                self.annotations.set_action(id, Action::Access);
                Ok(env)
            }
            Some(Binding::Var) => {
                self.annotations.set_action(id, Action::Access);
                Ok(varset::singleton(name, VarKind::Access))
            }
            Some(Binding::PendingVar) => {
                if self.in_func_body_depth == 0 {
                    return Err(SemError::UndefinedVariable { name, span });
                }
                self.annotations.set_action(id, Action::Access);
                Ok(varset::singleton(name, VarKind::Access))
            }
            None => Err(SemError::UndefinedVariable { name, span }),
        }
    }

    /// Checks that every variable a called function's environment captures
    /// is already really bound at this point in `seq` (spec.md scenario 7:
    /// `g(); x = 1` fails here, citing `x`, at the call site's span).
    fn check_env_available(&self, env: &VarSet, call_site: Span) -> Result<(), SemError> {
        for (name, _) in env {
            match self.scope.resolve(*name) {
                Some(Binding::Var) | Some(Binding::Func(_)) => {}
                Some(Binding::PendingVar) | None => {
                    return Err(SemError::UndefinedVariable {
                        name: *name,
                        span: call_site,
                    });
                }
            }
        }
        Ok(())
    }

    /// Computes (and memoizes) a function's transitively-closed free-variable
    /// environment, lazily, the first time it is needed (spec.md §4.3 pass
    /// 2: "the self-reference is excluded").
    fn ensure_env(&mut self, rep_id: NodeId) -> Result<VarSet, SemError> {
        if let Some(env) = self.annotations.env(rep_id) {
            return Ok(env.clone());
        }
        if self.computing.contains(&rep_id) {
            return Ok(VarSet::new());
        }
        let funcdef = self
            .func_table
            .get(&rep_id)
            .expect("Binding::Func always has a matching func_table entry");
        let funcdef = *funcdef;

        self.computing.insert(rep_id);
        self.in_func_body_depth += 1;

        let mut acc = VarSet::new();
        for clause in &funcdef.clauses {
            let rib = self.scope.enter_scope();
            let mut param_names = Vec::new();
            for pat in &clause.pats {
                let pat_varset = self.resolve_pattern(pat)?;
                for (name, _) in &pat_varset {
                    param_names.push(*name);
                }
            }
            let body_varset = self.resolve_expr(&clause.body)?;
            self.scope.exit_scope(rib);
            acc = varset::union(acc, varset::diff(body_varset, param_names));
        }

        self.in_func_body_depth -= 1;
        self.computing.remove(&rep_id);
        self.annotations.set_env(rep_id, acc.clone());
        Ok(acc)
    }

    fn resolve_case_clause(&mut self, clause: &'ast dlc_par::ast::Clause) -> Result<VarSet, SemError> {
        let rib = self.scope.enter_scope();
        let mut bound = Vec::new();
        let mut pat_varset = VarSet::new();
        for pat in &clause.pats {
            let vs = self.resolve_pattern(pat)?;
            for (name, kind) in &vs {
                if *kind == VarKind::Bind {
                    bound.push(*name);
                }
            }
            pat_varset = varset::union(pat_varset, vs);
        }
        let body_varset = self.resolve_expr(&clause.body)?;
        self.scope.exit_scope(rib);
        let varset = varset::diff(varset::union(pat_varset, body_varset), bound);
        self.annotations.set_varset(clause.id, varset.clone());
        Ok(varset)
    }

    fn resolve_pattern(&mut self, node: &'ast Node) -> Result<VarSet, SemError> {
        let varset = match &node.kind {
            NodeKind::Lit(_) | NodeKind::Regex(_) => VarSet::new(),
            NodeKind::Var(name) => {
                if *name == Symbol::KW_UNDERSCORE {
                    VarSet::new()
                } else {
                    let action = self.resolve_pattern_var(*name, node.span)?;
                    self.annotations.set_action(node.id, action);
                    let kind = match action {
                        Action::Bind => VarKind::Bind,
                        Action::Access => VarKind::Access,
                        _ => unreachable!("pattern resolution only yields bind or access"),
                    };
                    varset::singleton(*name, kind)
                }
            }
            NodeKind::Array(elems) => {
                let mut vs = VarSet::new();
                for e in elems {
                    vs = varset::union(vs, self.resolve_pattern(e)?);
                }
                vs
            }
            NodeKind::Dict(entries) => self.resolve_dict_entries_pattern(entries)?,
            NodeKind::DictUp { subj, entries } => {
                let mut vs = self.resolve_pattern(subj)?;
                vs = varset::union(vs, self.resolve_dict_entries_pattern(entries)?);
                vs
            }
            NodeKind::Binary { left, right, .. } => {
                let mut vs = self.resolve_pattern(left)?;
                vs = varset::union(vs, self.resolve_pattern(right)?);
                vs
            }
            NodeKind::Apply { .. }
            | NodeKind::If { .. }
            | NodeKind::Case { .. }
            | NodeKind::Do(_)
            | NodeKind::Unary { .. } => {
                unreachable!("dlc-par's validate_pattern rejects this node kind")
            }
        };
        self.annotations.set_varset(node.id, varset.clone());
        Ok(varset)
    }

    fn resolve_dict_entries_pattern(&mut self, entries: &'ast [DictEntry]) -> Result<VarSet, SemError> {
        let mut vs = VarSet::new();
        for entry in entries {
            vs = varset::union(vs, self.resolve_pattern(&entry.key)?);
            vs = varset::union(vs, self.resolve_pattern(&entry.value)?);
        }
        Ok(vs)
    }

    /// Bind-vs-access decision for a single pattern-position name (spec.md
    /// §4.3 pass 1): introduces a new binding if absent everywhere, upgrades
    /// this block's own not-yet-bound placeholder to a real binding the
    /// first time its `=` form is reached, treats an already-real binding
    /// as a comparison, and rejects matching against a function or against
    /// another scope's still-pending name (using it before it's bound).
    fn resolve_pattern_var(&mut self, name: Symbol, span: Span) -> Result<Action, SemError> {
        let current = self.scope.current_rib();
        if self.scope.is_bound_locally(current, name) {
            if let Some(Binding::PendingVar) = self.scope.resolve_from(current, name) {
                self.scope.bind(name, Binding::Var);
                return Ok(Action::Bind);
            }
        }
        match self.scope.resolve(name) {
            Some(Binding::Func(_)) => Err(SemError::PatternMatchOnFunction { name, span }),
            Some(Binding::PendingVar) => Err(SemError::UndefinedVariable { name, span }),
            Some(Binding::Var) => Ok(Action::Access),
            None => {
                self.scope.bind(name, Binding::Var);
                Ok(Action::Bind)
            }
        }
    }

    /// Resolves a `do` block's own scope: pre-declares functions and
    /// forward-visible `seq` names, resolves `seq` in order, then forces
    /// every local definition to be analyzed, and returns the block's
    /// outward varset (its own bindings diffed away).
    fn resolve_block(&mut self, scope_id: NodeId, block: &'ast Block) -> Result<VarSet, SemError> {
        let mut declared_leaves = Vec::new();
        for item in &block.seq {
            if let NodeKind::Binary {
                op: BinOp::Eq,
                left,
                ..
            } = &item.kind
            {
                collect_pattern_vars(left, &mut declared_leaves);
            }
        }
        let mut forward_declared = Vec::new();
        for leaf in &declared_leaves {
            if let NodeKind::Var(name) = leaf.kind {
                if self.scope.resolve(name).is_none() {
                    forward_declared.push(name);
                }
            }
        }

        let rib = self.scope.enter_scope();
        for name in &forward_declared {
            self.scope.bind_in(rib, *name, Binding::PendingVar);
        }
        let mut rep_ids = Vec::with_capacity(block.defs.len());
        for (name, funcdef) in &block.defs {
            let rep_id = funcdef.clauses[0].id;
            self.scope.bind_in(rib, *name, Binding::Func(rep_id));
            self.func_table.insert(rep_id, funcdef);
            rep_ids.push(rep_id);
        }

        let mut seq_varset = VarSet::new();
        for item in &block.seq {
            let item_varset = if let NodeKind::Binary {
                op: BinOp::Eq,
                left,
                right,
            } = &item.kind
            {
                self.resolve_let(item.id, left, right)?
            } else {
                self.resolve_expr(item)?
            };
            seq_varset = varset::union(seq_varset, item_varset);
        }

        let mut env_union = VarSet::new();
        for rep_id in rep_ids {
            env_union = varset::union(env_union, self.ensure_env(rep_id)?);
        }

        self.scope.exit_scope(rib);

        let outward = varset::diff(varset::union(seq_varset, env_union), forward_declared);
        Ok(outward)
    }

    fn resolve_let(&mut self, eq_id: NodeId, left: &'ast Node, right: &'ast Node) -> Result<VarSet, SemError> {
        let rhs_varset = self.resolve_expr(right)?;
        let lhs_varset = self.resolve_pattern(left)?;
        let varset = varset::union(rhs_varset, lhs_varset);
        self.annotations.set_varset(eq_id, varset.clone());
        Ok(varset)
    }
}
