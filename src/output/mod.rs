//! Output writers for analysis reports.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports (pretty)
//! - Bare bundle arrays for embedding in a renderer page
//! - Text summaries

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{bundles_to_string, read_report, report_to_string, write_report};
pub use summary::generate_text_summary;
