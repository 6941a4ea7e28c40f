//! The abstract syntax tree (spec.md §3 "AST node").
//!
//! Nodes are an owned recursive enum (`Box`-linked) rather than the source's
//! `{syntax, line, column, ...}` dict — the tagged-variant alternative
//! spec.md §9's Design Notes calls out explicitly. Every node still carries
//! a [`NodeId`] so the annotator (`dlc-sem`) can attach `varset`/`action`
//! through a side table keyed by identity instead of a second AST type.

use dlc_util::{NodeId, Span, Symbol};
use dlc_value::Value;
use indexmap::IndexMap;
use std::rc::Rc;

/// A parsed program is the implicit top-level `do` block (spec.md §4.2
/// "Top-level source is treated as the body of an implicit `do … end`
/// block").
pub type Ast = Node;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub span: Span,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, span: Span, kind: NodeKind) -> Self {
        Self { id, span, kind }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Lit(Value),
    Var(Symbol),
    Regex(Rc<str>),
    Array(Vec<Node>),
    Dict(Vec<DictEntry>),
    DictUp {
        subj: Box<Node>,
        entries: Vec<DictEntry>,
    },
    Apply {
        func: Box<Node>,
        args: Vec<Node>,
    },
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },
    Case {
        subj: Box<Node>,
        clauses: Vec<Clause>,
    },
    Do(Block),
    Unary {
        op: UnOp,
        right: Box<Node>,
    },
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// `key: value` inside a `dict`/`dictup` literal, or the same shape in a
/// `dict` pattern (spec.md §3: `entries: sequence of {syntax:"entry", key, value}`).
#[derive(Clone, Debug, PartialEq)]
pub struct DictEntry {
    pub span: Span,
    pub key: Node,
    pub value: Node,
}

/// One `pattern -> expr` arm of a `case`, or one equation of a multi-clause
/// function definition (spec.md GLOSSARY "Clause").
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    pub id: NodeId,
    pub span: Span,
    pub pats: Vec<Node>,
    pub body: Node,
}

/// The body of a `do … end` block: a sequence of expressions/let-bindings
/// plus the block's function definitions, keyed by name (spec.md §3: "`do`
/// always contains both `seq` and `defs`, possibly empty").
///
/// `defs` is an `IndexMap` rather than `HashMap` so that multiple clauses of
/// the same function accumulate, and definitions iterate, in source order —
/// matching `dlc-value`'s reason for preferring `IndexMap` over `HashMap`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub seq: Vec<Node>,
    pub defs: IndexMap<Symbol, FuncDef>,
}

/// `{name, arity, clauses, env?}` (spec.md §3). `env` is filled in by the
/// annotator's closure-environment pass (§4.3 pass 2) as a side-table entry
/// keyed by the definition's first clause id; it does not live on this type.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef {
    pub name: Symbol,
    pub arity: usize,
    pub clauses: Vec<Clause>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    Ne,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Tilde,
    At,
    Eq,
}

impl BinOp {
    /// Whether this operator is pattern-legal (spec.md §3 "In patterns: only
    /// var, lit, regex, array, dict, dictup, @, ~, = are allowed").
    pub fn is_pattern_legal(self) -> bool {
        matches!(self, BinOp::At | BinOp::Tilde | BinOp::Eq)
    }
}
