//! Plain-text summary of analyzed bundles.

use crate::aggregator::{calculate_size_distribution, heaviest_modules, AnalyzerNode};

const PATH_COLUMN_WIDTH: usize = 48;

/// Render a text summary for one bundle
///
/// **Public** - printed by `analyze --summary`
///
/// # Arguments
/// * `bundle` - Analyzed bundle
/// * `max_lines` - Number of heaviest modules to list
pub fn generate_text_summary(bundle: &AnalyzerNode, max_lines: usize) -> String {
    let mut lines = Vec::new();

    let kind = if bundle.is_asset {
        "asset"
    } else if bundle.is_entry {
        "entry"
    } else {
        "chunk"
    };

    lines.push(format!("  {} ({})", bundle.label, kind));
    lines.push(format!(
        "  stat: {}  parsed: {}  gzip: {}",
        format_size(bundle.stat_size),
        format_size(bundle.parsed_size),
        format_size(bundle.gzip_size)
    ));

    if !bundle.imports.is_empty() {
        let imports: Vec<&str> = bundle.imports.iter().map(String::as_str).collect();
        lines.push(format!("  imports: {}", imports.join(", ")));
    }

    if bundle.is_asset {
        return lines.join("\n");
    }

    // Prefer the source tree; fall back to stats when there is no source map
    let (tree, tree_name) = if bundle.source.is_fringe() {
        (&bundle.stats, "stat")
    } else {
        (&bundle.source, "parsed")
    };

    let distribution = calculate_size_distribution(tree);
    lines.push(format!("  {}", distribution.summary()));
    lines.push(String::new());
    lines.push(format!(
        "  {:<width$} {:>10} {:>10} {:>7}",
        format!("Heaviest modules ({})", tree_name),
        "SIZE",
        "GZIP",
        "%",
        width = PATH_COLUMN_WIDTH
    ));

    for module in heaviest_modules(tree, max_lines) {
        let gzip = module
            .gzip_size
            .map(format_size)
            .unwrap_or_else(|| "-".to_string());

        lines.push(format!(
            "  {:<width$} {:>10} {:>10} {:>6.1}%",
            truncate_path(&module.path),
            format_size(module.size),
            gzip,
            module.percentage,
            width = PATH_COLUMN_WIDTH
        ));
    }

    lines.join("\n")
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;

    let value = bytes as f64;
    if value < KIB {
        format!("{} B", bytes)
    } else if value < KIB * KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{:.2} MiB", value / (KIB * KIB))
    }
}

/// Keep the tail of long paths so file names stay visible
fn truncate_path(path: &str) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= PATH_COLUMN_WIDTH {
        return path.to_string();
    }

    let tail: String = chars[chars.len() - (PATH_COLUMN_WIDTH - 3)..].iter().collect();
    format!("...{}", tail)
}
