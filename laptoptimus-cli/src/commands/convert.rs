//! Convert command - one price into UAH.

use anyhow::Result;
use clap::Args;
use laptoptimus_core::{Currency, Listing, PriceConverter};

use super::load_settings;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Amount in the origin currency.
    #[arg(allow_negative_numbers = true)]
    pub price: f64,

    /// Currency tag: RON, UAH or USD.
    pub currency: String,
}

/// Runs the convert command.
pub async fn run(args: &ConvertArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let converter = PriceConverter::new(settings.exchange);
    let currency = Currency::from(args.currency.trim());

    match cli.format {
        OutputFormat::Text => {
            let listing = Listing::new("", args.price, currency.clone());
            let formatter = TextFormatter::new(!cli.no_color);
            println!(
                "{}",
                formatter.format_conversion(args.price, &currency, converter.quote(&listing), &converter)
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_conversion(args.price, &currency, &converter)?);
        }
    }

    Ok(())
}
