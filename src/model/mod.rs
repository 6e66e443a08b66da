//! Semantic model: the output side of a conversion pass.
//!
//! This module contains:
//! - Node types and semantic roles
//! - The arena tree with its shared text buffer
//! - Sparse semantic attributes (heading counts, spans)
//! - Placement rules backing the safe-insert contract

mod attrs;
mod node;
pub mod schema;
mod tree;

pub use attrs::AttrMap;
pub use node::{Node, NodeId, Role, TextRange};
pub use tree::{ChildIter, SemanticTree};
