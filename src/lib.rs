//! Bundle Size Studio
//!
//! Bundle size analysis for JavaScript bundler output. Turns flat
//! module lists and source maps into size-annotated module trees
//! for treemap rendering.
//!
//! This crate provides the core implementation for the
//! `bundle-size` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install bundle-size-studio
//! bundle-size analyze --manifest manifest.json --output stats.json
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod tree;
pub mod utils;
