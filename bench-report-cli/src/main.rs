//! Benchmark Report CLI Application
//!
//! Command-line front end for the bench-report-parser library:
//! - Reads a benchmark report (default `test_results.txt`)
//! - Averages every setup's measurements across its test runs
//! - Prints the averages as text or JSON, to stdout or a file

use anyhow::{Context, Result};
use bench_report_parser::{DuplicatePolicy, ReportParser};
use clap::Parser;
use std::path::PathBuf;

mod config;
mod report;

use config::{AppConfig, OutputFormat};

/// Benchmark Report - Average benchmark results per setup
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(about = "Average benchmark results per setup and category", long_about = None)]
#[command(version)]
struct Args {
    /// Report file to parse [default: test_results.txt]
    #[arg(value_name = "REPORT")]
    report: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the averages (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Handling of repeated setup names: reject, merge or overwrite
    #[arg(long, value_name = "POLICY")]
    duplicates: Option<DuplicatePolicy>,

    /// Fail if a setup is missing any of the four categories
    #[arg(long)]
    strict: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Bench Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using parser library v{}", bench_report_parser::VERSION);

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let config = file_config.with_overrides(
        args.report,
        args.format,
        args.output,
        args.duplicates,
        args.strict,
    );

    run(&config)
}

/// Parse the configured report and write the rendered averages
fn run(config: &AppConfig) -> Result<()> {
    let parser = ReportParser::with_config(config.parsing.clone());
    let report = parser
        .parse_file(&config.input.file)
        .with_context(|| format!("Failed to process report: {:?}", config.input.file))?;

    let rendered = report::render(&report, config.output.format, config.output.precision)?;

    match &config.output.file {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Averages written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
