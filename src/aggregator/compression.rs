//! Compressed size estimation.
//!
//! The aggregator only needs the compressed *length* of a byte slice, so the
//! codec sits behind a small trait. Gzip is the default.

use crate::utils::config::{DEFAULT_GZIP_LEVEL, MAX_GZIP_LEVEL};
use crate::utils::error::CompressionError;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Compression codec used for size estimates
pub trait Compressor {
    /// Compressed length of `bytes`
    ///
    /// Must be deterministic for a fixed codec configuration.
    fn compressed_size(&self, bytes: &[u8]) -> Result<usize, CompressionError>;
}

/// Gzip codec backed by `flate2`
#[derive(Debug, Clone, Copy)]
pub struct GzipCompressor {
    level: Compression,
}

impl GzipCompressor {
    /// Create a gzip codec at the given level (0-9)
    ///
    /// # Errors
    /// * `CompressionError::InvalidLevel` - level above 9
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        if level > MAX_GZIP_LEVEL {
            return Err(CompressionError::InvalidLevel(level));
        }

        Ok(Self {
            level: Compression::new(level),
        })
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self {
            level: Compression::new(DEFAULT_GZIP_LEVEL),
        }
    }
}

impl Compressor for GzipCompressor {
    fn compressed_size(&self, bytes: &[u8]) -> Result<usize, CompressionError> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), self.level);
        encoder.write_all(bytes)?;
        let compressed = encoder.finish()?;
        Ok(compressed.len())
    }
}
