//! Delivery command - landed cost for a Romanian laptop shipped to Ukraine.

use anyhow::Result;
use clap::Args;
use laptoptimus_core::{DeliveryCalculator, DeliveryRequest};

use super::load_settings;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the delivery command.
#[derive(Args)]
pub struct DeliveryArgs {
    /// Product price in RON.
    #[arg(long)]
    pub price_ron: f64,

    /// Parcel weight in kg.
    #[arg(long, default_value = "2.5")]
    pub weight: f64,

    /// Insure the parcel.
    #[arg(long)]
    pub insurance: bool,

    /// Include Ukrainian import duty and VAT.
    #[arg(long)]
    pub customs: bool,
}

impl DeliveryArgs {
    fn request(&self) -> DeliveryRequest {
        DeliveryRequest {
            weight_kg: self.weight,
            price_ron: self.price_ron,
            insurance: self.insurance,
            include_customs: self.customs,
        }
    }
}

/// Runs the delivery command.
pub async fn run(args: &DeliveryArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let request = args.request();
    let quote = DeliveryCalculator::new(settings.delivery).quote(&request, &settings.exchange)?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_delivery(&request, &quote));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_delivery(&request, &quote)?);
        }
    }

    Ok(())
}
