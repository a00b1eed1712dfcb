#![allow(dead_code)]

use serde_json::{json, Value};

/// Source map for `"aa\nbb"`: line 0 from `sources[0]`, line 1 from `sources[1]`
pub fn two_line_map(first: &str, second: &str) -> Value {
    json!({
        "version": 3,
        "sources": [first, second],
        "names": [],
        "mappings": "AAAA;ACAA"
    })
}

/// Manifest with one mapped entry chunk, one unmapped chunk and one asset
pub fn sample_manifest() -> Value {
    json!({
        "bundles": [
            {
                "fileName": "index.js",
                "code": "aa\nbb",
                "map": two_line_map("../src/a.js", "../src/b.js"),
                "modules": {
                    "/proj/src/a.js": { "originalLength": 30 },
                    "/proj/src/b.js": { "originalLength": 20 },
                    "/proj/src/style.css": { "originalLength": 50 },
                    "\u{0}commonjsHelpers.js": { "originalLength": 5 }
                },
                "moduleIds": ["/proj/src/a.js", "/proj/src/b.js"],
                "imports": ["vendor.js"],
                "dynamicImports": ["lazy.js"],
                "isEntry": true
            },
            {
                "fileName": "lazy.js",
                "code": "export default 1",
                "modules": {
                    "/proj/src/lazy.js": { "originalLength": 16 }
                },
                "moduleIds": ["/proj/src/lazy.js"]
            },
            {
                "fileName": "style.css",
                "kind": "asset",
                "code": "body { margin: 0 }"
            }
        ],
        "moduleInfos": [
            { "id": "/proj/src/a.js" },
            { "id": "/proj/src/b.js" },
            { "id": "/proj/src/lazy.js" },
            { "id": "\u{0}commonjsHelpers.js" }
        ]
    })
}
