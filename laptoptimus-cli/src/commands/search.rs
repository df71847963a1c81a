//! Search command - one chat turn with the search agent.

use anyhow::{Context, Result};
use clap::Args;
use laptoptimus_core::{ParsedSearchResult, PriceConverter};
use laptoptimus_search::{SearchError, SearchService};
use tracing::info;

use super::{load_settings, search_client};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// What to look for, e.g. "RTX 4060 laptop under 6000 RON".
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

impl SearchArgs {
    /// The query words joined into one string.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli).await?;
    let client = search_client(&settings)?;
    let converter = PriceConverter::new(settings.exchange);

    let query = args.query_text();
    let result = run_search(&client, &query).await?;

    print!("{}", render(&result, &query, &converter, cli)?);
    Ok(())
}

/// Runs one search turn, tagging service failures with a retry hint.
pub async fn run_search(service: &dyn SearchService, query: &str) -> Result<ParsedSearchResult> {
    info!(query, "Running search");
    match service.search(query).await {
        Ok(result) => Ok(result),
        Err(e) if e.is_configuration() => Err(e.into()),
        Err(e @ SearchError::EmptyQuery) => Err(e.into()),
        Err(e) => Err(e).context("Search failed, please try again"),
    }
}

/// Renders a parsed reply in the selected format.
pub fn render(
    result: &ParsedSearchResult,
    query: &str,
    converter: &PriceConverter,
    cli: &Cli,
) -> Result<String> {
    let mut out = match cli.format {
        OutputFormat::Text => TextFormatter::new(!cli.no_color).format_search(result, converter),
        OutputFormat::Json => {
            let query = Some(query).filter(|q| !q.is_empty());
            JsonFormatter::new(cli.pretty).format_search(result, query, converter)?
        }
    };
    out.push('\n');
    Ok(out)
}
