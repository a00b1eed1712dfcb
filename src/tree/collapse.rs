//! Collapse single-child directory chains.
//!
//! A directory with exactly one child is folded into that child so that
//! `src -> server -> shared.ts` renders as one `src/server/shared.ts` node.
//! Whether a node is a directory is judged by its id: anything with a
//! file extension is treated as a file and never folded.

use super::node::TreeNode;
use crate::parser::path_lexer::has_extension;

/// Collapse a finalized tree
///
/// **Public** - main entry point for collapsing
///
/// The root is a container and is never folded into its only child;
/// everything below it is collapsed with `collapse_node`. Collapsing an
/// already collapsed tree returns it unchanged.
pub fn collapse_tree(root: TreeNode) -> TreeNode {
    let TreeNode {
        id,
        label,
        path,
        size,
        children,
    } = root;

    TreeNode {
        id,
        label,
        path,
        size,
        children: children.map(|children| children.into_iter().map(collapse_node).collect()),
    }
}

/// Collapse a node and its subtree, children first
///
/// **Public** - the recursive step
pub fn collapse_node(node: TreeNode) -> TreeNode {
    let TreeNode {
        id,
        label,
        path,
        size,
        children,
    } = node;

    let Some(children) = children else {
        return TreeNode {
            id,
            label,
            path,
            size,
            children: None,
        };
    };

    let mut collapsed: Vec<TreeNode> = children.into_iter().map(collapse_node).collect();

    if collapsed.len() == 1 && !has_extension(&id) {
        if let Some(child) = collapsed.pop() {
            return TreeNode {
                id: format!("{}{}", id, child.id),
                label: format!("{}/{}", label, child.label),
                path: format!("{}/{}", path, child.path),
                size: child.size.or(size),
                children: child.children,
            };
        }
    }

    TreeNode {
        id,
        label,
        path,
        size,
        children: Some(collapsed),
    }
}
