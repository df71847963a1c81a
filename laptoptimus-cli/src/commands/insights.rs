//! Insights command - short AI status report.

use anyhow::Result;
use clap::Args;
use laptoptimus_search::SystemStats;

use super::{load_settings, search_client};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the insights command.
#[derive(Args)]
pub struct InsightsArgs {
    /// Service uptime, e.g. "99.98%".
    #[arg(long)]
    pub uptime: String,

    /// API quota usage, e.g. "42%".
    #[arg(long)]
    pub quota: String,

    /// Average latency, e.g. "120ms".
    #[arg(long)]
    pub latency: String,

    /// Database health, e.g. "OK".
    #[arg(long)]
    pub db_health: String,
}

/// Runs the insights command.
pub async fn run(args: &InsightsArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let client = search_client(&settings)?;

    let stats = SystemStats::new(&args.uptime, &args.quota, &args.latency, &args.db_health);
    let report = client.system_insights(&stats).await;

    match cli.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format_insights(&report)?),
    }

    Ok(())
}
