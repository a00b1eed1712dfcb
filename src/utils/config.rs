//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default gzip level used for compressed size estimates (zlib maximum)
pub const DEFAULT_GZIP_LEVEL: u32 = 9;

/// Highest gzip level accepted on the command line
pub const MAX_GZIP_LEVEL: u32 = 9;

/// Number of heaviest modules reported in text summaries
pub const DEFAULT_TOP_MODULES: usize = 10;

/// Path separator used by bundler module ids
pub const PATH_SEPARATOR: char = '/';

/// Relative-ancestry prefix stripped from source map source ids
pub const PARENT_DIR_PREFIX: &str = "../";

// Rollup-style virtual modules are prefixed with a NUL byte
pub const VIRTUAL_MODULE_PREFIX: char = '\0';

// Module id extensions counted in the stats tree
pub const SCRIPT_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx", "vue", "svelte",
];
