//! Command-line interface for xcstrings-tool.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::analyzer;
use crate::catalog::is_locale_identifier;
use crate::config::{self, Config};
use crate::gate;
use crate::parser;
use crate::report::{self, OutputFormat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Localization coverage auditor for Xcode String Catalogs.
///
/// Reads a `.xcstrings` file and reports which strings are translated,
/// missing, stale, or need review for a target language.
#[derive(Parser)]
#[command(name = "xcstrings-tool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report translation coverage for a target language
    Audit(AuditArgs),
    /// Check that a catalog is well-formed
    Validate(ValidateArgs),
    /// Export strings that still need translation to a CSV file
    Export(ExportArgs),
    /// Show catalog statistics for every language
    Stats(StatsArgs),
    /// Create a configuration file with the defaults
    Init(InitArgs),
}

/// Arguments for the audit command.
#[derive(Parser)]
pub struct AuditArgs {
    /// Path to the .xcstrings catalog
    pub catalog: PathBuf,

    /// Target language to audit (default: es-MX or the config file's)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Report format: console, json, csv, or markdown (repeatable)
    #[arg(short = 'f', long = "format")]
    pub formats: Vec<String>,

    /// Directory for localization_report.* files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Minimum completion percentage (exit non-zero if not met)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the validate command.
#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the .xcstrings catalog
    pub catalog: PathBuf,
}

/// Arguments for the export command.
#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the .xcstrings catalog
    pub catalog: PathBuf,

    /// Target language to export (default: es-MX or the config file's)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the stats command.
#[derive(Parser)]
pub struct StatsArgs {
    /// Path to the .xcstrings catalog
    pub catalog: PathBuf,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "xcstrings-tool.yaml")]
    pub output: PathBuf,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xcstrings_tool={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load config, reporting problems on stderr.
fn load_config(path: Option<&Path>) -> Option<Config> {
    match config::load(path) {
        Ok((config, source)) => {
            if let Some(source) = source {
                info!(path = %source.display(), "loaded config");
            }
            Some(config)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            None
        }
    }
}

/// Resolve and check the target language.
fn resolve_target(flag: Option<&str>, config: &Config) -> Option<String> {
    let target = flag.unwrap_or_else(|| config.target_language());
    if !is_locale_identifier(target) {
        eprintln!("Error: invalid target language {:?}", target);
        return None;
    }
    Some(target.to_string())
}

/// Run the audit command.
pub fn run_audit(args: &AuditArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let Some(target) = resolve_target(args.target.as_deref(), &config) else {
        return Ok(EXIT_ERROR);
    };

    // Validate formats
    let formats: Vec<OutputFormat> = if args.formats.is_empty() {
        config.formats()?
    } else {
        match args
            .formats
            .iter()
            .map(|f| f.parse::<OutputFormat>())
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    };

    // Validate threshold
    let threshold = args.threshold.or(config.threshold);
    if let Some(t) = threshold {
        if let Err(e) = gate::validate_threshold(t) {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    }

    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output_dir());
    info!(
        target = %target,
        formats = ?formats,
        output_dir = %output_dir.display(),
        threshold = ?threshold,
        "audit settings"
    );

    // Parse catalog
    let (catalog, entries) = match parser::parse_file(&args.catalog) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let result = analyzer::analyze(&catalog, &entries, &target);

    // Output results
    let path_str = args.catalog.to_string_lossy().to_string();
    report::write_pretty(&path_str, &result, config.console_limit());

    let written = report::write_reports(&formats, &output_dir, &path_str, &result)?;
    for path in &written {
        println!("  {} {}", "Wrote".dimmed(), path.display());
    }
    if !written.is_empty() {
        println!();
    }

    // Return appropriate exit code
    match threshold {
        Some(t) => {
            let outcome = gate::evaluate(&result, t);
            report::write_gate(&outcome);
            if outcome.passed {
                Ok(EXIT_SUCCESS)
            } else {
                Ok(EXIT_FAILED)
            }
        }
        None => Ok(EXIT_SUCCESS),
    }
}

/// Run the validate command.
pub fn run_validate(args: &ValidateArgs) -> anyhow::Result<i32> {
    let (valid, message) = parser::validate(&args.catalog);

    if valid {
        println!("{} {} is valid", "✓".green(), args.catalog.display());
        Ok(EXIT_SUCCESS)
    } else {
        println!(
            "{} {} is invalid: {}",
            "✗".red(),
            args.catalog.display(),
            message
        );
        Ok(EXIT_FAILED)
    }
}

/// Run the export command.
pub fn run_export(args: &ExportArgs) -> anyhow::Result<i32> {
    let Some(config) = load_config(args.config.as_deref()) else {
        return Ok(EXIT_ERROR);
    };

    let Some(target) = resolve_target(args.target.as_deref(), &config) else {
        return Ok(EXIT_ERROR);
    };

    let (catalog, entries) = match parser::parse_file(&args.catalog) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let result = analyzer::analyze(&catalog, &entries, &target);
    let rows = report::export_entries(&result, &args.output)?;

    println!(
        "Exported to {} ({} string{} for {})",
        args.output.display(),
        rows,
        if rows != 1 { "s" } else { "" },
        target
    );

    Ok(EXIT_SUCCESS)
}

/// Run the stats command.
pub fn run_stats(args: &StatsArgs) -> anyhow::Result<i32> {
    let (catalog, entries) = match parser::parse_file(&args.catalog) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let per_language = analyzer::analyze_all(&catalog, &entries);
    let path_str = args.catalog.to_string_lossy().to_string();
    report::write_stats(&path_str, &catalog, &per_language);

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Set target_language and threshold in {}", args.output.display());
    println!(
        "  2. Run: xcstrings-tool audit Localizable.xcstrings --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
