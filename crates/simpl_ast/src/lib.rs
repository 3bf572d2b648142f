//! simpl_ast: Abstract syntax tree for the simpl front end.
//!
//! Defines the node kinds and shapes the parser assembles, the visitor used
//! by every read-only traversal, and the single-pass tree release.

pub mod node;
pub mod release;
pub mod types;
pub mod visitor;

// Re-export key types
pub use node::*;
pub use release::{release, release_with};
pub use types::*;
pub use visitor::{for_each_child, walk_node, NodeVisitor};
