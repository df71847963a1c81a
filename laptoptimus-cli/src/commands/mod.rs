//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod delivery;
pub mod insights;
pub mod parse;
pub mod search;

use anyhow::Result;
use laptoptimus_search::{GeminiConfig, GeminiSearchClient};
use laptoptimus_store::{default_settings_path, LogLevel, Settings};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::Cli;

/// Returns the settings file this invocation reads.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.config_file.clone().unwrap_or_else(default_settings_path)
}

/// Loads settings and applies the command-line rate overrides.
pub async fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(&settings_path(cli)).await?;
    apply_overrides(&mut settings, cli);
    settings.validate()?;
    Ok(settings)
}

/// Log level from the settings file.
///
/// Runs before logging is set up, so a bad file just gives the default
/// level here; the command reports the load error itself.
pub async fn configured_log_level(cli: &Cli) -> LogLevel {
    Settings::load(&settings_path(cli))
        .await
        .map(|settings| settings.log_level)
        .unwrap_or_default()
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    let exchange = &mut settings.exchange;
    if let Some(rate) = cli.usd_buy_rate {
        debug!(rate, "Overriding usdBuyRate");
        exchange.usd_buy_rate = rate;
    }
    if let Some(factor) = cli.ron_to_usd {
        debug!(factor, "Overriding ronToUsdFactor");
        exchange.ron_to_usd_factor = factor;
    }
    if let Some(rate) = cli.delivery_rate {
        debug!(rate, "Overriding romanianDeliveryRate");
        exchange.romanian_delivery_rate = rate;
    }
}

/// Maps stored search settings and a resolved key to client settings.
pub fn gemini_config(settings: &Settings, api_key: Option<String>) -> GeminiConfig {
    let search = &settings.search;
    GeminiConfig {
        api_key,
        api_key_env: search.api_key_env.clone(),
        model: search.model.clone(),
        base_url: search.base_url.clone(),
        temperature: search.temperature,
        timeout: Duration::from_secs(search.timeout_secs),
        max_attempts: search.max_attempts,
    }
}

/// Builds the search client from settings and the process environment.
pub fn search_client(settings: &Settings) -> Result<GeminiSearchClient> {
    let config = gemini_config(settings, settings.api_key_from_env());
    Ok(GeminiSearchClient::new(config)?)
}
