//! Size-annotated module trees.
//!
//! Flat `(module id, size)` leaves are turned into a folder tree in two
//! phases:
//! - `builder` places leaves in an arena keyed by path segment and
//!   finalizes it into owned `TreeNode`s
//! - `collapse` merges single-child directory chains into one display node

pub mod builder;
pub mod collapse;
pub mod node;

// Re-export main types and functions
pub use builder::{build_tree, TreeBuilder};
pub use collapse::{collapse_node, collapse_tree};
pub use node::{Leaf, LeafSize, TreeNode};

/// Build and collapse a tree from flat leaves
///
/// **Public** - what the aggregator runs for every bundle and size kind
pub fn build_collapsed_tree(leaves: impl IntoIterator<Item = Leaf>) -> TreeNode {
    collapse_tree(build_tree(leaves))
}
