// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! LaptOptimus CLI - laptop price comparison between Romania and Ukraine.
//!
//! # Examples
//!
//! ```bash
//! # Ask the search agent
//! laptoptimus search "RTX 4060 laptop under 6000 RON"
//!
//! # Parse a saved reply offline
//! laptoptimus parse --file reply.txt
//!
//! # Convert a price into UAH
//! laptoptimus convert 6499 RON
//!
//! # Show a catalog file with converted prices
//! laptoptimus catalog catalog.json --status updated
//!
//! # Landed cost with customs
//! laptoptimus delivery --price-ron 6499 --weight 2.5 --customs
//!
//! # JSON output
//! laptoptimus --format json --pretty convert 1000 RON
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use laptoptimus_search::SearchError;
use laptoptimus_store::{LogLevel, StoreError};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{catalog, config, convert, delivery, insights, parse, search};

// ============================================================================
// CLI Definition
// ============================================================================

/// LaptOptimus CLI - laptop price comparison.
#[derive(Parser)]
#[command(name = "laptoptimus")]
#[command(about = "Laptop price comparison between Romanian and Ukrainian stores")]
#[command(long_about = r#"
LaptOptimus finds laptops in Romanian (RON) and Ukrainian (UAH) online
stores and shows every price in UAH.

Prices are converted with:
  UAH  -> as listed
  RON  -> (price x ronToUsdFactor x usdBuyRate) + romanianDeliveryRate
  USD  -> price x usdBuyRate

Search needs a Gemini API key in GEMINI_API_KEY (or API_KEY).

Examples:
  laptoptimus search "Lenovo Legion 5 cheapest"
  laptoptimus convert 6499 RON
  laptoptimus catalog catalog.json
  laptoptimus delivery --price-ron 6499 --weight 2.5
"#)]
#[command(version)]
#[command(author = "LaptOptimus Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Settings file to use instead of the default.
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Override the UAH per USD rate.
    #[arg(long, global = true, value_name = "RATE")]
    pub usd_buy_rate: Option<f64>,

    /// Override the RON to USD factor.
    #[arg(long, global = true, value_name = "FACTOR")]
    pub ron_to_usd: Option<f64>,

    /// Override the flat delivery surcharge (UAH) for RON listings.
    #[arg(long, global = true, value_name = "UAH")]
    pub delivery_rate: Option<f64>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask the search agent for laptops.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Parse a saved search reply.
    Parse(parse::ParseArgs),

    /// Convert a price into UAH.
    #[command(visible_alias = "c")]
    Convert(convert::ConvertArgs),

    /// Show a catalog file with converted prices.
    Catalog(catalog::CatalogArgs),

    /// Estimate landed cost for a Romanian laptop shipped to Ukraine.
    #[command(visible_alias = "d")]
    Delivery(delivery::DeliveryArgs),

    /// Short AI status report on monitoring figures.
    Insights(insights::InsightsArgs),

    /// Show configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// Search or other runtime failure; resubmitting may help.
    Error = 1,
    /// Missing credentials or bad settings.
    ConfigError = 2,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(e) = err.downcast_ref::<SearchError>() {
            if e.is_configuration() {
                return ExitCode::ConfigError;
            }
        }
        if let Some(e) = err.downcast_ref::<StoreError>() {
            if matches!(e, StoreError::Config(_) | StoreError::Serialization(_)) {
                return ExitCode::ConfigError;
            }
        }
        ExitCode::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Filter directive: `--verbose` wins, otherwise the configured level.
fn log_directive(verbose: bool, level: LogLevel) -> String {
    if verbose {
        "laptoptimus=debug,info".to_string()
    } else {
        format!("laptoptimus={level}")
    }
}

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = EnvFilter::new(log_directive(verbose, level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = commands::configured_log_level(&cli).await;
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match &cli.command {
        Commands::Search(args) => search::run(args, &cli).await,
        Commands::Parse(args) => parse::run(args, &cli).await,
        Commands::Convert(args) => convert::run(args, &cli).await,
        Commands::Catalog(args) => catalog::run(args, &cli).await,
        Commands::Delivery(args) => delivery::run(args, &cli).await,
        Commands::Insights(args) => insights::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}
