//! CLI for WebAPI Bench charts.
//!
//! This crate provides the command-line interface that renders comparison
//! charts from raw benchmark results. With no arguments it reads
//! `results/raw` and writes `results/charts`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webapi_bench_charts::{io, summary, ChartsConfig};

/// WebAPI Bench chart generator.
#[derive(Parser, Debug)]
#[command(name = "webapi-charts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: render).
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// Input directory override.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory override.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render all charts from the input directory.
    ///
    /// Writes to the output directory:
    /// - webapi_rps.svg, webapi_latency_mean.svg, webapi_latency_p99.svg
    /// - webapi_cpu.svg, webapi_memory.svg (only when resource files exist)
    Render {
        #[command(flatten)]
        common: CommonArgs,

        /// Also print a markdown summary of the extracted metrics.
        #[arg(short, long)]
        summary: bool,
    },

    /// Show the configured directories and the result files they contain.
    Status {
        #[command(flatten)]
        common: CommonArgs,

        /// List every discovered file with its label.
        #[arg(short, long)]
        detailed: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<ChartsConfig> {
    let mut config = ChartsConfig::load(common.config.as_deref())
        .context("failed to load chart configuration")?;
    if let Some(input) = &common.input {
        config = config.with_input_dir(input);
    }
    if let Some(output) = &common.output {
        config = config.with_output_dir(output);
    }
    Ok(config)
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Render {
        common: CommonArgs::default(),
        summary: false,
    });

    match command {
        Commands::Render { common, summary } => {
            init_tracing(common.verbose);
            let config = load_config(&common)?;

            let report = webapi_bench_charts::run(&config).context("chart run failed")?;

            if summary {
                println!(
                    "{}",
                    summary::generate_summary(&report.entries, &report.resources)
                );
            }
            if common.verbose {
                for chart in &report.charts {
                    println!("  - {}", chart.display());
                }
            }

            println!("Charts saved in {}", report.output_dir.display());
            Ok(())
        }
        Commands::Status { common, detailed } => {
            init_tracing(common.verbose);
            let config = load_config(&common)?;
            let found = io::discover(&config.input_dir, &config.resource_suffix)?;

            println!("WebAPI Bench Charts");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Input directory: {}", config.input_dir.display());
            println!("Output directory: {}", config.output_dir.display());
            println!("Reports: {}", found.reports.len());
            println!("Resource files: {}", found.resources.len());

            if detailed {
                println!("\nReports:");
                for path in &found.reports {
                    println!("  - {} ({})", io::report_label(path), path.display());
                }
                println!("\nResource files:");
                for path in &found.resources {
                    println!(
                        "  - {} ({})",
                        io::resource_label(path, &config.resource_suffix),
                        path.display()
                    );
                }
            }

            Ok(())
        }
    }
}
