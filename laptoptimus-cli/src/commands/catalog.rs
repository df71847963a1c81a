//! Catalog command - tracked listings with converted prices.

use anyhow::{bail, Result};
use clap::Args;
use laptoptimus_core::{ListingStatus, PriceConverter};
use laptoptimus_store::{CatalogSource, JsonCatalog};
use std::path::PathBuf;
use tracing::info;

use super::load_settings;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog file (JSON array of records).
    pub file: PathBuf,

    /// Only show records with this status (new, updated, stable, deleted).
    #[arg(long, short)]
    pub status: Option<String>,
}

/// Runs the catalog command.
pub async fn run(args: &CatalogArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let converter = PriceConverter::new(settings.exchange);
    let catalog = JsonCatalog::new(&args.file);

    let items = match args.status.as_deref() {
        Some(label) => {
            let Some(status) = ListingStatus::from_label(label) else {
                let known: Vec<String> = ListingStatus::all().iter().map(ToString::to_string).collect();
                bail!("Unknown status: {label}. Use: {}", known.join(", "));
            };
            catalog.items_with_status(status).await?
        }
        None => catalog.items().await?,
    };
    info!(count = items.len(), "Catalog records");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_catalog(&items, &converter));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_catalog(&items, &converter)?);
        }
    }

    Ok(())
}
