//! Per-bundle size aggregation.
//!
//! For every bundle two trees are produced:
//! - `stats`: rendered module lengths reported by the bundler
//! - `source`: generated code attributed to original files through the
//!   source map, with parsed and gzip sizes
//!
//! Bundles are independent: a failure aborts only the bundle it occurs in.

use super::compression::Compressor;
use crate::parser::manifest::{BundleKind, BundleRecord, ModuleInfoProvider};
use crate::parser::source_map::attribute_sources;
use crate::tree::{build_collapsed_tree, Leaf, TreeNode};
use crate::utils::config::{SCRIPT_EXTENSIONS, VIRTUAL_MODULE_PREFIX};
use crate::utils::error::{AggregateError, AttributionError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Analysis result for one bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerNode {
    /// Bundle file name
    pub label: String,

    /// Sum of rendered module lengths in the stats tree
    pub stat_size: u64,

    /// Byte length of the generated code
    pub parsed_size: u64,

    /// Compressed byte length of the generated code
    pub gzip_size: u64,

    pub stats: TreeNode,
    pub source: TreeNode,

    /// Static and dynamic import specifiers, deduplicated
    pub imports: BTreeSet<String>,

    pub is_asset: bool,
    pub is_entry: bool,
}

/// Outcome of analyzing a sequence of bundles
#[derive(Debug, Default)]
pub struct BundleAnalysis {
    /// Successfully analyzed bundles, in input order
    pub nodes: Vec<AnalyzerNode>,

    /// Bundles that failed, in input order
    pub failures: Vec<AggregateError>,
}

/// Analyze bundles one at a time
///
/// **Public** - main entry point for aggregation
///
/// A failing bundle is logged and recorded in `failures`; it never affects
/// bundles analyzed before or after it.
pub fn analyze_bundles<'a>(
    bundles: impl IntoIterator<Item = &'a BundleRecord>,
    modules: &impl ModuleInfoProvider,
    compressor: &impl Compressor,
) -> BundleAnalysis {
    let mut analysis = BundleAnalysis::default();

    for bundle in bundles {
        match analyze_bundle(bundle, modules, compressor) {
            Ok(node) => analysis.nodes.push(node),
            Err(e) => {
                warn!("Skipping bundle {}: {}", e.bundle(), e);
                analysis.failures.push(e);
            }
        }
    }

    info!(
        "Analyzed {} bundles ({} failed)",
        analysis.nodes.len(),
        analysis.failures.len()
    );

    analysis
}

/// Analyze a single bundle
///
/// **Public** - builds both trees and the bundle totals
///
/// # Errors
/// * `AggregateError::Attribution` - the source map cannot be decoded
/// * `AggregateError::Compression` - the codec failed
pub fn analyze_bundle(
    bundle: &BundleRecord,
    modules: &impl ModuleInfoProvider,
    compressor: &impl Compressor,
) -> Result<AnalyzerNode, AggregateError> {
    debug!("Analyzing bundle: {}", bundle.file_name);

    let compression_failed = |source| AggregateError::Compression {
        bundle: bundle.file_name.clone(),
        source,
    };

    let parsed_size = bundle.code.len() as u64;
    let gzip_size = compressor
        .compressed_size(bundle.code.as_bytes())
        .map_err(compression_failed)? as u64;

    let imports = collect_imports(bundle);

    if bundle.kind == BundleKind::Asset {
        return Ok(AnalyzerNode {
            label: bundle.file_name.clone(),
            stat_size: parsed_size,
            parsed_size,
            gzip_size,
            stats: build_collapsed_tree(Vec::new()),
            source: build_collapsed_tree(Vec::new()),
            imports,
            is_asset: true,
            is_entry: bundle.is_entry,
        });
    }

    let stat_leaves = stat_leaves(bundle, modules);
    let stat_size: u64 = stat_leaves.iter().map(|leaf| leaf.size.weight()).sum();

    let source_leaves = source_leaves(bundle, compressor)?;

    debug!(
        "Bundle {}: {} stat leaves, {} source leaves",
        bundle.file_name,
        stat_leaves.len(),
        source_leaves.len()
    );

    Ok(AnalyzerNode {
        label: bundle.file_name.clone(),
        stat_size,
        parsed_size,
        gzip_size,
        stats: build_collapsed_tree(stat_leaves),
        source: build_collapsed_tree(source_leaves),
        imports,
        is_asset: false,
        is_entry: bundle.is_entry,
    })
}

/// Leaves for the stats tree
///
/// **Public** - script-like and virtual modules whose info the host can
/// resolve; everything else is skipped.
pub fn stat_leaves(bundle: &BundleRecord, modules: &impl ModuleInfoProvider) -> Vec<Leaf> {
    bundle
        .modules
        .iter()
        .filter(|(id, _)| is_tracked_module(id))
        .filter_map(|(id, module)| match modules.module_info(id) {
            Some(info) => Some(Leaf::stat(info.id, module.original_length)),
            None => {
                debug!("No module info for {}, skipping", id);
                None
            }
        })
        .collect()
}

/// Leaves for the source tree
///
/// **Public** - each attributed source is matched against the bundle's
/// declared module ids; the first id containing the source id wins.
/// Unmatched sources are dropped.
pub fn source_leaves(
    bundle: &BundleRecord,
    compressor: &impl Compressor,
) -> Result<Vec<Leaf>, AggregateError> {
    let attribution_failed = |source| AggregateError::Attribution {
        bundle: bundle.file_name.clone(),
        source,
    };

    let raw_map = bundle
        .source_map_bytes()
        .map_err(|e| attribution_failed(AttributionError::EncodeFailed(e)))?;

    let attributed =
        attribute_sources(&bundle.code, raw_map.as_deref()).map_err(attribution_failed)?;

    let mut leaves = Vec::with_capacity(attributed.len());
    for source in attributed {
        let Some(module_id) = match_module_id(&bundle.module_ids, &source.source) else {
            debug!("Source {} matches no module of {}", source.source, bundle.file_name);
            continue;
        };

        let gzip_size = compressor
            .compressed_size(source.code.as_bytes())
            .map_err(|e| AggregateError::Compression {
                bundle: bundle.file_name.clone(),
                source: e,
            })?;

        leaves.push(Leaf::source(
            module_id,
            source.code.len() as u64,
            gzip_size as u64,
        ));
    }

    Ok(leaves)
}

/// First declared module id containing `source`
pub fn match_module_id<'a>(module_ids: &'a [String], source: &str) -> Option<&'a str> {
    module_ids
        .iter()
        .find(|id| id.contains(source))
        .map(String::as_str)
}

/// Whether a module id belongs in the stats tree
///
/// **Public** - script extensions (query strings ignored) or virtual ids
pub fn is_tracked_module(id: &str) -> bool {
    if id.starts_with(VIRTUAL_MODULE_PREFIX) {
        return true;
    }

    let path = id.split(['?', '#']).next().unwrap_or(id);
    let file_name = path.rsplit('/').next().unwrap_or(path);

    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => SCRIPT_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension)),
        _ => false,
    }
}

fn collect_imports(bundle: &BundleRecord) -> BTreeSet<String> {
    bundle
        .imports
        .iter()
        .chain(&bundle.dynamic_imports)
        .cloned()
        .collect()
}
