use crate::client::{ScrapeOptions, SearchRequest};
use crate::commands::{Context, Invocation};
use crate::model::normalize_search;
use crate::output::render;
use crate::parse::parse_positive_integer;
use crate::report::plural;
use crate::Result;
use clap::Args;
use std::io::Write;

/// Search the web and return results
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// The search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of results (default: Firecrawl default)
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Also scrape content from each result
    #[arg(long)]
    pub scrape: bool,

    /// Language code (e.g., en, es, de)
    #[arg(long)]
    pub lang: Option<String>,

    /// Country code (e.g., us, uk, de)
    #[arg(long)]
    pub country: Option<String>,
}

impl SearchArgs {
    pub fn validate(self) -> Result<Invocation> {
        let limit = self
            .limit
            .as_deref()
            .map(|raw| parse_positive_integer(raw, "limit"))
            .transpose()?;

        let location = match (self.lang, self.country) {
            (Some(lang), Some(country)) => Some(format!("{}-{}", lang, country)),
            (lang, country) => lang.or(country),
        };

        Ok(Invocation::Search(SearchRequest {
            query: self.query,
            limit,
            location,
            scrape_options: self.scrape.then(ScrapeOptions::markdown),
        }))
    }
}

pub async fn run(request: &SearchRequest, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let reporter = ctx.reporter;
    reporter.status(format!("Searching for \"{}\"...", request.query));
    if let Some(location) = &request.location {
        reporter.detail(format!("Location: {}", location));
    }
    if request.scrapes_content() {
        reporter.detail("Scraping content for each result");
    }

    let items = ctx.client.search_web(request).await?;
    let (outcome, diagnostics) = normalize_search(&request.query, &items, request.scrapes_content());

    if diagnostics.unrecognized_items > 0 {
        reporter.warn(format!(
            "{} result(s) could not be parsed and were skipped",
            diagnostics.unrecognized_items
        ));
    }
    if diagnostics.unscraped_hits > 0 {
        reporter.warn(format!(
            "Failed to scrape {} result(s)",
            diagnostics.unscraped_hits
        ));
    }

    reporter.success(format!("Found {}", plural(outcome.hits.len(), "result")));
    render(&outcome, ctx.mode, out)?;
    Ok(())
}
