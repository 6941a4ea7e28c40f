//! dlc-util - Foundation types shared by every phase of the `dlc` pipeline.
//!
//! Every other crate in this workspace (`dlc-value`, `dlc-lex`, `dlc-par`,
//! `dlc-sem`, `dlc`) depends on this one for:
//!
//! - [`Span`]: a 1-based line/column source position, attached to every
//!   token and AST node.
//! - [`Symbol`]: an interned identifier, used for variable and function
//!   names so that comparisons and hash-map lookups are O(1).
//! - [`Idx`] / [`IndexVec`]: a typed-index vector, used by the annotator to
//!   keep scopes (`RibId`) and AST nodes (`NodeId`) in distinct index
//!   spaces instead of raw `usize`.
//! - [`diagnostic`]: the `Handler`/`Diagnostic` reporting infrastructure
//!   every pass uses to surface errors and warnings with a source location.
//!
//! None of this is specific to the language `dlc` compiles; it is the same
//! kind of small, dependency-free utility layer every multi-crate compiler
//! workspace grows.

pub mod diagnostic;
mod index_vec;
mod node_id;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use index_vec::{define_idx, Idx, IndexVec};
pub use node_id::{NodeId, NodeIdGenerator};
pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
