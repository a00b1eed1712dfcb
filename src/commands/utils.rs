use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Bundles: {}", report.bundles.len());
    println!("  Parsed Size: {} bytes", report.total_parsed_size());
    println!("  Gzip Size: {} bytes", report.total_gzip_size());

    if report.version != SCHEMA_VERSION {
        println!(
            "  ⚠ Schema version {} differs from current {}",
            report.version, SCHEMA_VERSION
        );
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Bundle Size Studio Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generatedAt: string      - ISO 8601 timestamp");
        println!("  bundles: array           - One entry per bundle");
        println!("    label: string          - Bundle file name");
        println!("    statSize: number       - Sum of rendered module lengths");
        println!("    parsedSize: number     - Generated code length");
        println!("    gzipSize: number       - Compressed generated code length");
        println!("    stats: tree            - Modules by rendered length");
        println!("    source: tree           - Original sources by attributed length");
        println!("    imports: array         - Static and dynamic imports");
        println!("    isAsset: bool          - Static asset rather than chunk");
        println!("    isEntry: bool          - Entry chunk");
        println!("  tree node:");
        println!("    id, label, path: string");
        println!("    statSize?: number      - Stat leaves only");
        println!("    parsedSize?, gzipSize?: number - Source leaves only");
        println!("    children?: array       - Absent on leaves");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Bundle Size Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Bundle size analysis and treemap data for JavaScript bundler output.");
}
