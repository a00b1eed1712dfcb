//! Calculate size metrics from collapsed module trees.
//!
//! Heavy modules are the fringe nodes that contribute most bytes to a
//! bundle. These are the primary targets for size optimization.

use crate::tree::TreeNode;
use log::debug;
use serde::{Deserialize, Serialize};

/// A fringe module with its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleWeight {
    /// Full display path from the tree root
    pub path: String,

    /// Stat size or parsed size, depending on the tree
    pub size: u64,

    /// Compressed size (source trees only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip_size: Option<u64>,

    /// Percentage of the tree total
    pub percentage: f64,
}

/// Calculate the heaviest modules of a tree
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `tree` - Collapsed tree (stats or source)
/// * `top_n` - Number of modules to return
///
/// # Returns
/// Modules sorted by weight (descending), ties by path
pub fn heaviest_modules(tree: &TreeNode, top_n: usize) -> Vec<ModuleWeight> {
    let mut modules = Vec::new();
    collect_weights(tree, "", &mut modules);

    let total: u64 = modules.iter().map(|m| m.size).sum();
    debug!(
        "Ranking {} modules ({} bytes), keeping top {}",
        modules.len(),
        total,
        top_n
    );

    modules.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    modules.truncate(top_n);

    for module in &mut modules {
        module.percentage = percentage_of(module.size, total);
    }

    modules
}

/// Walk the tree, joining labels into full paths
///
/// **Private** - empty labels (the root) add no segment
fn collect_weights(node: &TreeNode, prefix: &str, out: &mut Vec<ModuleWeight>) {
    let path = match (prefix.is_empty(), node.label.is_empty()) {
        (_, true) => prefix.to_string(),
        (true, false) => node.label.clone(),
        (false, false) => format!("{}/{}", prefix, node.label),
    };

    if node.is_fringe() {
        if let Some(size) = &node.size {
            out.push(ModuleWeight {
                path,
                size: size.weight(),
                gzip_size: size.gzip_weight(),
                percentage: 0.0,
            });
        }
        return;
    }

    for child in node.children() {
        collect_weights(child, &path, out);
    }
}

fn percentage_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Calculate size distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_size_distribution(tree: &TreeNode) -> SizeDistribution {
    let mut weights: Vec<u64> = tree
        .fringe()
        .iter()
        .filter_map(|node| node.size.as_ref())
        .map(|size| size.weight())
        .collect();

    if weights.is_empty() {
        return SizeDistribution::default();
    }

    let total: u64 = weights.iter().sum();
    let count = weights.len();
    let mean = total / count as u64;

    weights.sort_unstable_by(|a, b| b.cmp(a));
    let median = weights[count / 2];

    // Top 10% of modules
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_size: u64 = weights.iter().take(top_10_percent_count).sum();

    SizeDistribution {
        total_size: total,
        module_count: count,
        mean_module_size: mean,
        median_module_size: median,
        top_10_percent_size,
        top_10_percent_percentage: percentage_of(top_10_percent_size, total),
    }
}

/// Size distribution statistics
///
/// **Public** - returned from calculate_size_distribution
#[derive(Debug, Clone, Default)]
pub struct SizeDistribution {
    /// Total bytes across all modules
    pub total_size: u64,

    /// Number of fringe modules
    pub module_count: usize,

    pub mean_module_size: u64,
    pub median_module_size: u64,

    /// Bytes contributed by the heaviest 10% of modules
    pub top_10_percent_size: u64,

    /// Percentage of total bytes in the heaviest 10%
    pub top_10_percent_percentage: f64,
}

impl SizeDistribution {
    /// Check if size is highly concentrated
    ///
    /// Returns true if the heaviest 10% of modules hold >80% of bytes
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} bytes | Modules: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total_size,
            self.module_count,
            self.mean_module_size,
            self.median_module_size,
            self.top_10_percent_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build_collapsed_tree, Leaf};

    fn sample_tree() -> TreeNode {
        build_collapsed_tree(vec![
            Leaf::stat("src/a/big.js", 8500),
            Leaf::stat("src/a/mid.js", 500),
            Leaf::stat("src/b.js", 500),
            Leaf::stat("lib/x.js", 500),
        ])
    }

    #[test]
    fn test_heaviest_modules() {
        let modules = heaviest_modules(&sample_tree(), 2);

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].path, "src/a/big.js");
        assert_eq!(modules[0].size, 8500);
        assert_eq!(modules[0].percentage, 85.0);
        // Equal weights are ordered by path
        assert_eq!(modules[1].path, "lib/x.js");
        assert!(modules[0].gzip_size.is_none());
    }

    #[test]
    fn test_heaviest_modules_uses_collapsed_labels() {
        let tree = build_collapsed_tree(vec![Leaf::source("node_modules/pkg/index.js", 40, 10)]);
        let modules = heaviest_modules(&tree, 5);

        assert_eq!(modules[0].path, "node_modules/pkg/index.js");
        assert_eq!(modules[0].gzip_size, Some(10));
        assert_eq!(modules[0].percentage, 100.0);
    }

    #[test]
    fn test_calculate_size_distribution() {
        let dist = calculate_size_distribution(&sample_tree());

        assert_eq!(dist.total_size, 10000);
        assert_eq!(dist.module_count, 4);
        assert_eq!(dist.mean_module_size, 2500);
        assert_eq!(dist.median_module_size, 500);
        assert!(dist.is_highly_concentrated());
        assert!(dist.summary().contains("Modules: 4"));
    }

    #[test]
    fn test_size_distribution_empty() {
        let dist = calculate_size_distribution(&build_collapsed_tree(Vec::new()));
        assert_eq!(dist.total_size, 0);
        assert_eq!(dist.module_count, 0);
        assert!(!dist.is_highly_concentrated());
    }
}
