//! AST node identity.
//!
//! The parser assigns every node a [`NodeId`] as it builds the tree; the
//! annotator never touches the AST itself but instead keys a side table
//! (a node's [`crate::Symbol`] bindings, its computed varset) by that id.
//! See spec.md §9's "varset overlay becomes a side table keyed by node
//! identity" — this is the index type that table uses.

use crate::define_idx;
use std::sync::atomic::{AtomicU32, Ordering};

define_idx!(
    /// Identifies a single AST node for the lifetime of a compilation.
    NodeId
);

/// Hands out increasing [`NodeId`]s while the parser builds a tree.
///
/// A plain `u32` counter would do for a single-threaded parser, but the
/// atomic costs nothing here and matches the rest of the workspace's
/// generator types.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    counter: AtomicU32,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU32::new(0),
        }
    }

    pub fn next(&self) -> NodeId {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        NodeId(id)
    }
}
