//! Place flat leaves into a folder tree.
//!
//! Construction happens in an arena of nodes addressed by index, each with
//! a key → child lookup. `finish` drains the arena into owned `TreeNode`s;
//! the lookup tables never outlive the builder.
//!
//! Example: leaves `a/b/c.js` and `a/b/d.js` become
//! `"" -> a -> b -> {c.js, d.js}`.

use super::node::{Leaf, LeafSize, TreeNode};
use crate::parser::path_lexer::lex;
use log::debug;
use std::collections::HashMap;

/// Index of the synthetic root in the arena
const ROOT: usize = 0;

/// Arena slot used during construction
#[derive(Debug)]
struct BuildNode {
    key: String,
    size: Option<LeafSize>,

    /// Child indices in insertion order
    children: Vec<usize>,

    /// Child lookup by key
    slots: HashMap<String, usize>,
}

impl BuildNode {
    fn new(key: String, size: Option<LeafSize>) -> Self {
        Self {
            key,
            size,
            children: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

/// Two-phase tree builder
///
/// **Public** - use `insert` for every leaf, then `finish`
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<BuildNode>,
    dropped: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![BuildNode::new(String::new(), None)],
            dropped: 0,
        }
    }

    /// Insert a leaf
    ///
    /// **Public** - returns false when the leaf's slot was already taken.
    /// The first leaf placed in a slot wins; later ones are dropped. That
    /// includes a later leaf whose folder path runs through an earlier
    /// leaf, so sized nodes never gain children.
    pub fn insert(&mut self, leaf: Leaf) -> bool {
        let Leaf { id, size } = leaf;
        let segments = lex(&id);

        let mut parent = Some(ROOT);
        for folder in &segments.folders {
            parent = parent.and_then(|index| self.child_or_directory(index, folder));
        }

        let placed = match parent {
            Some(index) => self.attach(index, segments.file_name, size),
            None => false,
        };
        if !placed {
            debug!("Dropping colliding leaf: {}", id);
            self.dropped += 1;
        }
        placed
    }

    /// Number of leaves dropped because of slot or folder collisions
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Finalize into an owned tree rooted at an empty-id directory
    ///
    /// **Public** - consumes the builder
    pub fn finish(self) -> TreeNode {
        let mut arena: Vec<Option<BuildNode>> = self.nodes.into_iter().map(Some).collect();
        finalize(&mut arena, ROOT).unwrap_or_else(|| TreeNode::directory(""))
    }

    /// Look up a child directory by key, creating it if absent
    ///
    /// `None` when the key is already taken by a sized leaf.
    fn child_or_directory(&mut self, parent: usize, key: &str) -> Option<usize> {
        if let Some(&existing) = self.nodes[parent].slots.get(key) {
            return self.nodes[existing].size.is_none().then_some(existing);
        }

        Some(self.push_child(parent, key, None))
    }

    /// Attach a sized node under `parent`; no-op if the key is taken
    fn attach(&mut self, parent: usize, key: &str, size: LeafSize) -> bool {
        if self.nodes[parent].slots.contains_key(key) {
            return false;
        }

        self.push_child(parent, key, Some(size));
        true
    }

    fn push_child(&mut self, parent: usize, key: &str, size: Option<LeafSize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(BuildNode::new(key.to_string(), size));

        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(index);
        parent_node.slots.insert(key.to_string(), index);

        index
    }
}

/// Move an arena node and its subtree into an owned `TreeNode`
fn finalize(arena: &mut [Option<BuildNode>], index: usize) -> Option<TreeNode> {
    let node = arena.get_mut(index)?.take()?;

    let children: Vec<TreeNode> = node
        .children
        .iter()
        .filter_map(|&child| finalize(arena, child))
        .collect();

    let mut finalized = match node.size {
        Some(size) => TreeNode::leaf(node.key, size),
        None => TreeNode::directory(node.key),
    };

    if finalized.size.is_none() {
        finalized.children = Some(children);
    }

    Some(finalized)
}

/// Build a tree from flat leaves
///
/// **Public** - main entry point for tree building
///
/// # Arguments
/// * `leaves` - Leaves to place; consumed
///
/// # Returns
/// Root directory (empty id) with all placed leaves below it
pub fn build_tree(leaves: impl IntoIterator<Item = Leaf>) -> TreeNode {
    let mut builder = TreeBuilder::new();
    let mut inserted = 0usize;

    for leaf in leaves {
        builder.insert(leaf);
        inserted += 1;
    }

    debug!(
        "Built tree from {} leaves ({} dropped as duplicates)",
        inserted,
        builder.dropped()
    );

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(node: &TreeNode) -> Vec<&str> {
        node.children().iter().map(|child| child.id.as_str()).collect()
    }

    #[test]
    fn test_build_empty() {
        let root = build_tree(Vec::new());
        assert_eq!(root.id, "");
        assert_eq!(root.children, Some(Vec::new()));
    }

    #[test]
    fn test_build_nested_shares_folders() {
        let root = build_tree(vec![Leaf::stat("a/b/c.js", 1), Leaf::stat("a/b/d.js", 2)]);

        assert_eq!(keys(&root), vec!["a"]);
        let b = &root.children()[0].children()[0];
        assert_eq!(b.id, "b");
        assert_eq!(keys(b), vec!["c.js", "d.js"]);
        assert_eq!(b.children()[1].size, Some(LeafSize::Stat { stat_size: 2 }));
        assert!(b.children()[0].children.is_none());
    }

    #[test]
    fn test_top_level_leaf() {
        let root = build_tree(vec![Leaf::stat("index.js", 5)]);
        assert_eq!(keys(&root), vec!["index.js"]);
        assert_eq!(root.total_weight(), 5);
    }

    #[test]
    fn test_first_leaf_wins() {
        let mut builder = TreeBuilder::new();
        assert!(builder.insert(Leaf::stat("x.js", 1)));
        assert!(!builder.insert(Leaf::stat("x.js", 99)));
        assert_eq!(builder.dropped(), 1);

        let root = builder.finish();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].size, Some(LeafSize::Stat { stat_size: 1 }));
    }

    #[test]
    fn test_leaf_under_existing_directory_key_is_dropped() {
        let root = build_tree(vec![Leaf::stat("a/b.js", 1), Leaf::stat("a", 7)]);

        assert_eq!(keys(&root), vec!["a"]);
        assert!(root.children()[0].size.is_none());
        assert_eq!(root.total_weight(), 1);
    }

    #[test]
    fn test_folder_through_existing_leaf_is_dropped() {
        let mut builder = TreeBuilder::new();
        assert!(builder.insert(Leaf::stat("\0vite/x", 7)));
        assert!(!builder.insert(Leaf::stat("\0vite/x/y.js", 1)));
        assert_eq!(builder.dropped(), 1);

        let root = builder.finish();
        let x = &root.children()[0].children()[0];
        assert_eq!(x.id, "x");
        assert_eq!(x.size, Some(LeafSize::Stat { stat_size: 7 }));
        assert!(x.children.is_none());
        assert_eq!(root.total_weight(), 7);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let root = build_tree(vec![
            Leaf::stat("z.js", 1),
            Leaf::stat("lib/m.js", 1),
            Leaf::stat("a.js", 1),
        ]);

        assert_eq!(keys(&root), vec!["z.js", "lib", "a.js"]);
    }
}
