//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the build manifest
//! 2. Attributes and compresses every bundle
//! 3. Builds and collapses the stats and source trees
//! 4. Writes the JSON report (and optionally the bare bundle array)

use super::models::AnalyzeArgs;
use crate::aggregator::{analyze_bundles, calculate_size_distribution, GzipCompressor};
use crate::output::{bundles_to_string, generate_text_summary, write_report};
use crate::parser::{read_manifest, Report};
use crate::utils::config::MAX_GZIP_LEVEL;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Manifest read or parse failures
/// * Invalid gzip level
/// * File write errors
///
/// Individual bundle failures are logged and leave the bundle out of the
/// report; they do not fail the command.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.manifest.display());

    // Step 1: Read manifest
    info!("Step 1/3: Reading build manifest...");
    let manifest = read_manifest(&args.manifest)
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;

    debug!(
        "Manifest: {} bundles, {} module infos",
        manifest.bundles.len(),
        manifest.module_infos.len()
    );

    // Step 2: Aggregate bundles
    info!("Step 2/3: Analyzing {} bundles...", manifest.bundles.len());
    let compressor =
        GzipCompressor::new(args.gzip_level).context("Failed to configure gzip codec")?;
    let analysis = analyze_bundles(&manifest.bundles, &manifest, &compressor);

    for failure in &analysis.failures {
        warn!("Bundle excluded from report: {}", failure);
    }

    for bundle in &analysis.nodes {
        let distribution = calculate_size_distribution(&bundle.stats);
        debug!("{}: {}", bundle.label, distribution.summary());
    }

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");
    let report = Report::new(analysis.nodes);

    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if let Some(data_path) = &args.output_data {
        let data = bundles_to_string(&report.bundles).context("Failed to serialize bundles")?;
        std::fs::write(data_path, data)
            .with_context(|| format!("Failed to write {}", data_path.display()))?;
        info!("✓ Bundle data written to: {}", data_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("BUNDLE SIZE SUMMARY");
        println!("{}", "=".repeat(80));
        for bundle in &report.bundles {
            println!("{}\n", generate_text_summary(bundle, args.top_modules));
        }
        println!(
            "Bundles: {}  Parsed: {} bytes  Gzip: {} bytes",
            report.bundles.len(),
            report.total_parsed_size(),
            report.total_gzip_size()
        );
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments before running
///
/// **Public** - called before execute_analyze
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.manifest.exists() {
        bail!("Manifest not found: {}", args.manifest.display());
    }

    if args.gzip_level > MAX_GZIP_LEVEL {
        bail!(
            "Invalid gzip level {} (expected 0-{})",
            args.gzip_level,
            MAX_GZIP_LEVEL
        );
    }

    if args.output_data.as_ref() == Some(&args.output_json) {
        bail!("--output and --data must point to different files");
    }

    Ok(())
}
