//! Aggregation of bundle data into size-annotated trees and metrics.
//!
//! This module transforms bundle records into:
//! - Stats and source trees per bundle
//! - Heaviest-module rankings
//! - Size distribution statistics

pub mod analyzer;
pub mod compression;
pub mod metrics;

// Re-export main types and functions
pub use analyzer::{analyze_bundle, analyze_bundles, AnalyzerNode, BundleAnalysis};
pub use compression::{Compressor, GzipCompressor};
pub use metrics::{calculate_size_distribution, heaviest_modules, ModuleWeight, SizeDistribution};
