//! Output JSON schema definitions for analysis reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::AnalyzerNode;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// One entry per analyzed bundle, in bundler order
    pub bundles: Vec<AnalyzerNode>,
}

impl Report {
    /// Wrap analyzed bundles in a report stamped with the current time
    pub fn new(bundles: Vec<AnalyzerNode>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            bundles,
        }
    }

    /// Sum of gzip sizes over all bundles
    pub fn total_gzip_size(&self) -> u64 {
        self.bundles.iter().map(|b| b.gzip_size).sum()
    }

    /// Sum of parsed sizes over all bundles
    pub fn total_parsed_size(&self) -> u64 {
        self.bundles.iter().map(|b| b.parsed_size).sum()
    }
}
