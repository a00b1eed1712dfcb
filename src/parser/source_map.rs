//! Attribute generated bundle code back to original source files.
//!
//! Every character of the generated code is looked up in the source map
//! and appended to the entry of the original file that produced it.
//! The per-file strings are what later get measured and compressed.

use crate::utils::config::PARENT_DIR_PREFIX;
use crate::utils::error::AttributionError;
use log::debug;
use sourcemap::SourceMap;
use std::collections::HashMap;

/// Generated code attributed to one original source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedSource {
    /// Normalized source id (`../` segments stripped)
    pub source: String,

    /// Generated characters attributed to this source, in offset order
    pub code: String,
}

/// Attribute generated code to its original sources
///
/// **Public** - main entry point for source attribution
///
/// # Arguments
/// * `code` - Generated bundle code
/// * `raw_map` - Raw source map bytes, `None` when the bundle has no map
///
/// # Returns
/// One entry per source id, ordered by first occurrence in the code.
/// Without a source map the result is empty.
///
/// # Errors
/// * `AttributionError::InvalidSourceMap` - the map cannot be decoded
pub fn attribute_sources(
    code: &str,
    raw_map: Option<&[u8]>,
) -> Result<Vec<AttributedSource>, AttributionError> {
    let Some(raw_map) = raw_map else {
        debug!("No source map, skipping attribution");
        return Ok(Vec::new());
    };

    // The consumer only lives for the duration of this call
    let consumer = SourceMap::from_slice(raw_map)?;
    let attributed = attribute_with(code, &consumer);

    debug!(
        "Attributed {} chars to {} sources",
        code.chars().count(),
        attributed.len()
    );

    Ok(attributed)
}

/// Attribute generated code using an already decoded source map
///
/// **Public** - useful when the caller holds the consumer
///
/// Characters without an original source are dropped.
pub fn attribute_with(code: &str, consumer: &SourceMap) -> Vec<AttributedSource> {
    let mut attributed: Vec<AttributedSource> = Vec::new();
    let mut slot_by_name: HashMap<String, usize> = HashMap::new();
    let mut slot_by_src_id: HashMap<u32, usize> = HashMap::new();

    let mut line: u32 = 0;
    let mut column: u32 = 0;

    for ch in code.chars() {
        if let Some(src_id) = lookup_src_id(consumer, line, column) {
            let slot = match slot_by_src_id.get(&src_id) {
                Some(&slot) => Some(slot),
                None => consumer.get_source(src_id).map(|source| {
                    let name = normalize_source_id(source);
                    let slot = match slot_by_name.get(&name) {
                        Some(&slot) => slot,
                        None => {
                            attributed.push(AttributedSource {
                                source: name.clone(),
                                code: String::new(),
                            });
                            slot_by_name.insert(name, attributed.len() - 1);
                            attributed.len() - 1
                        }
                    };
                    slot_by_src_id.insert(src_id, slot);
                    slot
                }),
            };

            if let Some(slot) = slot {
                attributed[slot].code.push(ch);
            }
        }

        // Advance after lookup so a newline keeps its own position
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += ch.len_utf16() as u32;
        }
    }

    attributed
}

/// Strip every `../` occurrence from a source id
///
/// **Public** - pure string normalization, nothing is resolved against a base
pub fn normalize_source_id(source: &str) -> String {
    source.replace(PARENT_DIR_PREFIX, "")
}

/// Resolve the source index of the mapping covering a generated position
///
/// Only segments on the same generated line count (greatest lower bound).
fn lookup_src_id(consumer: &SourceMap, line: u32, column: u32) -> Option<u32> {
    let token = consumer.lookup_token(line, column)?;

    if token.get_dst_line() != line || !token.has_source() {
        return None;
    }

    Some(token.get_src_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map_bytes(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_no_map_is_empty() {
        let attributed = attribute_sources("const a = 1;", None).unwrap();
        assert!(attributed.is_empty());
    }

    #[test]
    fn test_invalid_map_is_error() {
        let result = attribute_sources("a", Some(b"not a source map"));
        assert!(matches!(result, Err(AttributionError::InvalidSourceMap(_))));
    }

    #[test]
    fn test_two_sources_on_one_line() {
        // "aaabbb": cols 0-2 from ../src/a.js, cols 3-5 from src/b.js
        let raw = map_bytes(json!({
            "version": 3,
            "sources": ["../src/a.js", "src/b.js"],
            "names": [],
            "mappings": "AAAA,GCAA"
        }));

        let attributed = attribute_sources("aaabbb", Some(&raw)).unwrap();

        assert_eq!(attributed.len(), 2);
        assert_eq!(attributed[0].source, "src/a.js");
        assert_eq!(attributed[0].code, "aaa");
        assert_eq!(attributed[1].source, "src/b.js");
        assert_eq!(attributed[1].code, "bbb");
    }

    #[test]
    fn test_unmapped_line_is_dropped() {
        // Only the first line has a mapping; the newline belongs to line 0
        let raw = map_bytes(json!({
            "version": 3,
            "sources": ["a.js"],
            "names": [],
            "mappings": "AAAA;"
        }));

        let attributed = attribute_sources("ab\ncd", Some(&raw)).unwrap();

        assert_eq!(attributed.len(), 1);
        assert_eq!(attributed[0].code, "ab\n");
    }

    #[test]
    fn test_leading_columns_before_first_segment_are_dropped() {
        let raw = map_bytes(json!({
            "version": 3,
            "sources": ["a.js"],
            "names": [],
            "mappings": "EAAA"
        }));

        let attributed = attribute_sources("xxyy", Some(&raw)).unwrap();

        assert_eq!(attributed.len(), 1);
        assert_eq!(attributed[0].code, "yy");
    }

    #[test]
    fn test_sources_normalizing_to_same_id_are_merged() {
        let raw = map_bytes(json!({
            "version": 3,
            "sources": ["../a.js", "../../a.js"],
            "names": [],
            "mappings": "AAAA,CCAA"
        }));

        let attributed = attribute_sources("xy", Some(&raw)).unwrap();

        assert_eq!(attributed.len(), 1);
        assert_eq!(attributed[0].source, "a.js");
        assert_eq!(attributed[0].code, "xy");
    }

    #[test]
    fn test_normalize_source_id() {
        assert_eq!(normalize_source_id("../../node_modules/x/index.js"), "node_modules/x/index.js");
        assert_eq!(normalize_source_id("src/../lib/a.js"), "src/lib/a.js");
        assert_eq!(normalize_source_id("plain.js"), "plain.js");
    }
}
