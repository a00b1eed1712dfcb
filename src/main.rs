//! Bundle Size Studio CLI
//!
//! Analyzes bundler output and writes size-annotated module trees
//! for treemap rendering.

use anyhow::Result;
use bundle_size_studio::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs,
};
use bundle_size_studio::utils::config::{DEFAULT_GZIP_LEVEL, DEFAULT_TOP_MODULES};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Bundle Size Studio - size analysis for bundler output
#[derive(Parser, Debug)]
#[command(name = "bundle-size")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a build manifest and write the size report
    Analyze {
        /// Build manifest JSON exported by the bundler
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long, default_value = "stats.json")]
        output: PathBuf,

        /// Output path for the bare bundle array (for embedding)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Gzip level for compressed sizes (0-9)
        #[arg(long, env = "BUNDLE_SIZE_GZIP_LEVEL", default_value_t = DEFAULT_GZIP_LEVEL)]
        gzip_level: u32,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of heaviest modules per bundle in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_MODULES)]
        top: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            manifest,
            output,
            data,
            gzip_level,
            summary,
            top,
        } => {
            let args = AnalyzeArgs {
                manifest,
                output_json: output,
                output_data: data,
                gzip_level,
                print_summary: summary,
                top_modules: top,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
