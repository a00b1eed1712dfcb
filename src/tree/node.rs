//! Tree node and leaf types.

use serde::{Deserialize, Serialize};

/// Size carried by a leaf
///
/// Serialized flattened into the owning node, so a stat leaf shows up as
/// `statSize` and a source leaf as `parsedSize` + `gzipSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafSize {
    /// Original source contribution and its compressed length
    #[serde(rename_all = "camelCase")]
    Source { parsed_size: u64, gzip_size: u64 },

    /// Raw emitted byte length of a module
    #[serde(rename_all = "camelCase")]
    Stat { stat_size: u64 },
}

impl LeafSize {
    /// Primary weight: stat size or parsed size
    pub fn weight(&self) -> u64 {
        match self {
            Self::Stat { stat_size } => *stat_size,
            Self::Source { parsed_size, .. } => *parsed_size,
        }
    }

    /// Compressed weight, only known for source leaves
    pub fn gzip_weight(&self) -> Option<u64> {
        match self {
            Self::Stat { .. } => None,
            Self::Source { gzip_size, .. } => Some(*gzip_size),
        }
    }
}

/// Flat tree-builder input: a module id and its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Module id, split on `/` to find the leaf's place in the tree
    pub id: String,
    pub size: LeafSize,
}

impl Leaf {
    pub fn stat(id: impl Into<String>, stat_size: u64) -> Self {
        Self {
            id: id.into(),
            size: LeafSize::Stat { stat_size },
        }
    }

    pub fn source(id: impl Into<String>, parsed_size: u64, gzip_size: u64) -> Self {
        Self {
            id: id.into(),
            size: LeafSize::Source {
                parsed_size,
                gzip_size,
            },
        }
    }
}

/// A finalized tree node
///
/// `children` is `None` only for fringe leaves; directories always carry
/// a (possibly empty) sequence. Children keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub path: String,

    #[serde(flatten)]
    pub size: Option<LeafSize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Directory node with no children yet
    pub fn directory(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            label: key.clone(),
            path: key,
            size: None,
            children: Some(Vec::new()),
        }
    }

    /// Fringe leaf node
    pub fn leaf(key: impl Into<String>, size: LeafSize) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            label: key.clone(),
            path: key,
            size: Some(size),
            children: None,
        }
    }

    /// Children as a slice (empty for fringe leaves)
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// True when the node has no children
    pub fn is_fringe(&self) -> bool {
        self.children().is_empty()
    }

    /// All fringe nodes, depth-first in child order
    pub fn fringe(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        collect_fringe(self, &mut out);
        out
    }

    /// Sum of primary weights over fringe nodes
    pub fn total_weight(&self) -> u64 {
        self.fringe()
            .iter()
            .filter_map(|node| node.size.as_ref())
            .map(LeafSize::weight)
            .sum()
    }

    /// Sum of compressed weights over fringe nodes
    pub fn total_gzip_weight(&self) -> u64 {
        self.fringe()
            .iter()
            .filter_map(|node| node.size.as_ref())
            .filter_map(LeafSize::gzip_weight)
            .sum()
    }

    /// Number of nodes in the tree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Depth of the tree (a lone node has depth 1)
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

fn collect_fringe<'a>(node: &'a TreeNode, out: &mut Vec<&'a TreeNode>) {
    if node.is_fringe() {
        out.push(node);
        return;
    }

    for child in node.children() {
        collect_fringe(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_leaf_serialization() {
        let node = TreeNode::leaf("a.js", LeafSize::Stat { stat_size: 42 });
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(
            value,
            json!({ "id": "a.js", "label": "a.js", "path": "a.js", "statSize": 42 })
        );
    }

    #[test]
    fn test_source_directory_serialization() {
        let mut dir = TreeNode::directory("src");
        dir.children = Some(vec![TreeNode::leaf(
            "b.ts",
            LeafSize::Source {
                parsed_size: 10,
                gzip_size: 7,
            },
        )]);

        let value = serde_json::to_value(&dir).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "src", "label": "src", "path": "src",
                "children": [
                    { "id": "b.ts", "label": "b.ts", "path": "b.ts", "parsedSize": 10, "gzipSize": 7 }
                ]
            })
        );
    }

    #[test]
    fn test_deserialize_round_trip() {
        let raw = json!({
            "id": "", "label": "", "path": "",
            "children": [
                { "id": "a.js", "label": "a.js", "path": "a.js", "statSize": 3 },
                { "id": "b.js", "label": "b.js", "path": "b.js", "parsedSize": 4, "gzipSize": 2 }
            ]
        });

        let node: TreeNode = serde_json::from_value(raw).unwrap();

        assert!(node.size.is_none());
        assert_eq!(node.children()[0].size, Some(LeafSize::Stat { stat_size: 3 }));
        assert_eq!(node.total_weight(), 7);
        assert_eq!(node.total_gzip_weight(), 2);
    }

    #[test]
    fn test_counts() {
        let mut dir = TreeNode::directory("a");
        dir.children = Some(vec![
            TreeNode::leaf("b.js", LeafSize::Stat { stat_size: 1 }),
            TreeNode::leaf("c.js", LeafSize::Stat { stat_size: 2 }),
        ]);

        assert_eq!(dir.node_count(), 3);
        assert_eq!(dir.depth(), 2);
        assert_eq!(dir.fringe().len(), 2);
        assert!(TreeNode::directory("empty").is_fringe());
    }
}
