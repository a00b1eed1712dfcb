//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a build manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur while attributing generated code to sources
#[derive(Error, Debug)]
pub enum AttributionError {
    #[error("Invalid source map: {0}")]
    InvalidSourceMap(#[from] sourcemap::Error),

    #[error("Failed to encode source map: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

/// Errors raised by the compression codec
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Compression codec failed: {0}")]
    CodecFailed(#[from] std::io::Error),

    #[error("Unsupported compression level: {0}")]
    InvalidLevel(u32),
}

/// Errors that abort aggregation of a single bundle
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Bundle {bundle}: {source}")]
    Attribution {
        bundle: String,
        #[source]
        source: AttributionError,
    },

    #[error("Bundle {bundle}: {source}")]
    Compression {
        bundle: String,
        #[source]
        source: CompressionError,
    },
}

impl AggregateError {
    /// Name of the bundle whose aggregation failed
    pub fn bundle(&self) -> &str {
        match self {
            Self::Attribution { bundle, .. } | Self::Compression { bundle, .. } => bundle,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
