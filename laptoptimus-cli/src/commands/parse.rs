//! Parse command - extract offers from a saved search reply.

use anyhow::{Context, Result};
use clap::Args;
use laptoptimus_core::PriceConverter;
use laptoptimus_search::SearchResponseParser;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::debug;

use super::{load_settings, search::render};
use crate::Cli;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// File holding the reply text (reads stdin if omitted).
    #[arg(long, short = 'i')]
    pub file: Option<PathBuf>,
}

/// Runs the parse command.
pub async fn run(args: &ParseArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let converter = PriceConverter::new(settings.exchange);

    let raw = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };
    debug!(len = raw.len(), "Reply text read");

    let result = SearchResponseParser::parse(&raw);
    print!("{}", render(&result, "", &converter, cli)?);
    Ok(())
}
