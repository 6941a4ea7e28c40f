//! Per-occurrence annotation a `var` node carries after analysis (spec.md
//! §3 invariant: "every `var` node has an `action` of exactly one of
//! `bind | discard | first | last | only | access`").
//!
//! The reference-counting code generator downstream (out of scope here)
//! uses this to decide whether a use needs to retain its value (`access`),
//! may consume it (`last`, `only`), introduces a fresh binding (`bind`,
//! `first`), or can skip emitting anything at all (`discard`).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// A pattern occurrence that introduces a new name, later referenced.
    Bind,
    /// A pattern occurrence that introduces a name never referenced again.
    Discard,
    /// The first expression-position access of a variable with more than
    /// one access (spec.md §4.3 pass 3, the dual of `Last`).
    First,
    /// The last expression-position access of a variable with more than
    /// one access.
    Last,
    /// The unique access of a variable that is both the first and the last.
    Only,
    /// An expression-position access that is neither the first nor the
    /// last occurrence of its variable.
    Access,
}
