//! Build manifest parsing.
//!
//! The manifest is the hand-off format from the bundler host: one record
//! per emitted bundle plus the host's module-info table. It is read once,
//! validated, and then queried by the aggregator.

use crate::utils::error::ManifestError;
use log::{debug, info, warn};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Kind of emitted output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    /// Compiled script chunk with modules and (optionally) a source map
    #[default]
    Chunk,
    /// Static asset (css, images, ...) with no module structure
    Asset,
}

/// Per-module data reported by the bundler for one chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    /// Length of the module's rendered output in the chunk
    #[serde(default)]
    pub original_length: u64,
}

/// One emitted bundle
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleRecord {
    /// Output file name, used as the bundle label
    pub file_name: String,

    #[serde(default)]
    pub kind: BundleKind,

    /// Generated code (or asset source)
    #[serde(default)]
    pub code: String,

    /// Source map as a JSON object or a JSON-encoded string
    #[serde(default)]
    pub map: Option<serde_json::Value>,

    /// Rendered modules, in the order the bundler reported them
    #[serde(default, deserialize_with = "ordered_modules")]
    pub modules: Vec<(String, ModuleRecord)>,

    /// Declared module ids, in bundler order
    #[serde(default)]
    pub module_ids: Vec<String>,

    #[serde(default)]
    pub imports: Vec<String>,

    #[serde(default)]
    pub dynamic_imports: Vec<String>,

    #[serde(default)]
    pub is_entry: bool,
}

impl BundleRecord {
    /// Raw source map bytes, if the bundle carries a map
    ///
    /// String-valued maps are passed through unchanged; object-valued maps
    /// are re-encoded.
    pub fn source_map_bytes(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        match &self.map {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(raw)) => Ok(Some(raw.clone().into_bytes())),
            Some(value) => serde_json::to_vec(value).map(Some),
        }
    }
}

/// Module information resolved by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleInfo {
    pub id: String,
}

/// Module-info lookup capability provided by the bundler host
pub trait ModuleInfoProvider {
    /// Resolve a module id, `None` if the host does not know it
    fn module_info(&self, module_id: &str) -> Option<ModuleInfo>;
}

impl ModuleInfoProvider for HashMap<String, ModuleInfo> {
    fn module_info(&self, module_id: &str) -> Option<ModuleInfo> {
        self.get(module_id).cloned()
    }
}

/// Top-level manifest document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildManifest {
    #[serde(default)]
    pub bundles: Vec<BundleRecord>,

    #[serde(default)]
    pub module_infos: Vec<ModuleInfo>,

    #[serde(skip)]
    info_index: HashMap<String, usize>,
}

impl BuildManifest {
    /// Create a manifest from bundles and module infos
    pub fn new(bundles: Vec<BundleRecord>, module_infos: Vec<ModuleInfo>) -> Self {
        let mut manifest = Self {
            bundles,
            module_infos,
            info_index: HashMap::new(),
        };
        manifest.index_module_infos();
        manifest
    }

    /// Rebuild the module-info lookup index (first entry per id wins)
    fn index_module_infos(&mut self) {
        self.info_index.clear();
        for (position, info) in self.module_infos.iter().enumerate() {
            self.info_index.entry(info.id.clone()).or_insert(position);
        }
    }
}

impl ModuleInfoProvider for BuildManifest {
    fn module_info(&self, module_id: &str) -> Option<ModuleInfo> {
        self.info_index
            .get(module_id)
            .and_then(|&position| self.module_infos.get(position))
            .cloned()
    }
}

/// Parse a manifest from a JSON string
///
/// **Public** - main entry point for manifest parsing
///
/// # Errors
/// * `ManifestError::JsonError` - malformed JSON
/// * `ManifestError::InvalidFormat` - structurally invalid manifest
pub fn parse_manifest(raw: &str) -> Result<BuildManifest, ManifestError> {
    let mut manifest: BuildManifest = serde_json::from_str(raw)?;
    manifest.index_module_infos();
    validate_manifest(&manifest)?;

    debug!(
        "Parsed manifest: {} bundles, {} module infos",
        manifest.bundles.len(),
        manifest.module_infos.len()
    );

    Ok(manifest)
}

/// Read and parse a manifest file
///
/// **Public** - used by the analyze command
pub fn read_manifest(input_path: impl AsRef<Path>) -> Result<BuildManifest, ManifestError> {
    let input_path = input_path.as_ref();

    info!("Reading build manifest: {}", input_path.display());

    let file = File::open(input_path)?;
    let mut manifest: BuildManifest = serde_json::from_reader(BufReader::new(file))?;
    manifest.index_module_infos();
    validate_manifest(&manifest)?;

    Ok(manifest)
}

/// Validate manifest structure
///
/// **Public** - only an empty bundle name is rejected. Duplicate names and
/// a chunk that renders modules without declaring module ids are suspicious
/// but still analyzable, so they are logged and kept.
pub fn validate_manifest(manifest: &BuildManifest) -> Result<(), ManifestError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (position, bundle) in manifest.bundles.iter().enumerate() {
        if bundle.file_name.is_empty() {
            return Err(ManifestError::InvalidFormat(format!(
                "bundle #{} has an empty fileName",
                position
            )));
        }

        if let Some(previous) = seen.insert(bundle.file_name.as_str(), position) {
            warn!(
                "Bundle '{}' appears twice (#{} and #{}); analyzing both",
                bundle.file_name, previous, position
            );
        }

        if bundle.kind == BundleKind::Chunk
            && bundle.module_ids.is_empty()
            && !bundle.modules.is_empty()
        {
            warn!(
                "Bundle '{}' renders {} modules but declares no module ids",
                bundle.file_name,
                bundle.modules.len()
            );
        }
    }

    Ok(())
}

/// Deserialize a JSON object into key/value pairs, keeping document order
fn ordered_modules<'de, D>(deserializer: D) -> Result<Vec<(String, ModuleRecord)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedModules;

    impl<'de> Visitor<'de> for OrderedModules {
        type Value = Vec<(String, ModuleRecord)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of module ids to module records")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut modules = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, record)) = access.next_entry::<String, ModuleRecord>()? {
                modules.push((id, record));
            }
            Ok(modules)
        }
    }

    deserializer.deserialize_map(OrderedModules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_manifest_keeps_module_order() {
        let raw = json!({
            "bundles": [{
                "fileName": "index.js",
                "code": "",
                "modules": {
                    "/src/z.js": { "originalLength": 3 },
                    "/src/a.js": { "originalLength": 5 }
                },
                "moduleIds": ["/src/z.js", "/src/a.js"],
                "isEntry": true
            }],
            "moduleInfos": [{ "id": "/src/z.js" }]
        })
        .to_string();

        let manifest = parse_manifest(&raw).unwrap();
        let bundle = &manifest.bundles[0];

        assert_eq!(bundle.modules[0].0, "/src/z.js");
        assert_eq!(bundle.modules[1].1.original_length, 5);
        assert_eq!(bundle.kind, BundleKind::Chunk);
        assert!(bundle.is_entry);
        assert!(manifest.module_info("/src/z.js").is_some());
        assert!(manifest.module_info("/src/a.js").is_none());
    }

    #[test]
    fn test_parse_manifest_keeps_duplicate_bundles() {
        let raw = json!({
            "bundles": [
                { "fileName": "a.js", "code": "first" },
                { "fileName": "a.js", "code": "second" }
            ]
        })
        .to_string();

        let manifest = parse_manifest(&raw).unwrap();
        assert_eq!(manifest.bundles.len(), 2);
        assert_eq!(manifest.bundles[0].code, "first");
        assert_eq!(manifest.bundles[1].code, "second");
    }

    #[test]
    fn test_parse_manifest_rejects_empty_name() {
        let raw = json!({ "bundles": [{ "fileName": "" }] }).to_string();
        assert!(parse_manifest(&raw).is_err());
    }

    #[test]
    fn test_source_map_bytes() {
        let mut bundle = BundleRecord {
            file_name: "a.js".to_string(),
            ..Default::default()
        };
        assert!(bundle.source_map_bytes().unwrap().is_none());

        bundle.map = Some(json!("{\"version\":3}"));
        assert_eq!(bundle.source_map_bytes().unwrap().unwrap(), b"{\"version\":3}");

        bundle.map = Some(json!({ "version": 3 }));
        let bytes = bundle.source_map_bytes().unwrap().unwrap();
        assert_eq!(bytes, b"{\"version\":3}");
    }

    #[test]
    fn test_asset_kind() {
        let raw = json!({ "bundles": [{ "fileName": "style.css", "kind": "asset" }] }).to_string();
        let manifest = parse_manifest(&raw).unwrap();
        assert_eq!(manifest.bundles[0].kind, BundleKind::Asset);
    }
}
