use crate::utils::config::{DEFAULT_GZIP_LEVEL, DEFAULT_TOP_MODULES};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Build manifest produced by the bundler host
    pub manifest: PathBuf,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Optional path for the bare bundle array (for embedding)
    pub output_data: Option<PathBuf>,

    /// Gzip level used for compressed sizes
    pub gzip_level: u32,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of heaviest modules listed per bundle in the summary
    pub top_modules: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("manifest.json"),
            output_json: PathBuf::from("stats.json"),
            output_data: None,
            gzip_level: DEFAULT_GZIP_LEVEL,
            print_summary: false,
            top_modules: DEFAULT_TOP_MODULES,
        }
    }
}
