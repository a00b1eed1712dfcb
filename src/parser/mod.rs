//! Input parsing and schema definitions.
//!
//! This module handles:
//! - Parsing the bundler's build manifest
//! - Lexing module ids into path segments
//! - Attributing generated code to sources via source maps
//! - Defining the output report schema

pub mod manifest;
pub mod path_lexer;
pub mod schema;
pub mod source_map;

// Re-export main types
pub use manifest::{
    parse_manifest, read_manifest, BuildManifest, BundleKind, BundleRecord, ModuleInfo,
    ModuleInfoProvider, ModuleRecord,
};
pub use path_lexer::{has_extension, lex, PathSegments};
pub use schema::Report;
pub use source_map::{attribute_sources, AttributedSource};
