use crate::client::MapRequest;
use crate::commands::{Context, Invocation};
use crate::model::normalize_map;
use crate::output::render;
use crate::parse::{parse_choice, parse_positive_integer, SitemapMode};
use crate::report::plural;
use crate::Result;
use clap::Args;
use std::io::Write;

/// Discover all URLs on a website
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    /// The starting URL to map
    #[arg(value_name = "URL")]
    pub url: String,

    /// Maximum URLs to discover
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Filter URLs by keyword
    #[arg(long)]
    pub search: Option<String>,

    /// Include URLs from subdomains
    #[arg(long)]
    pub include_subdomains: bool,

    /// Sitemap handling: only, include, skip
    #[arg(long)]
    pub sitemap: Option<String>,
}

impl MapArgs {
    pub fn validate(self) -> Result<Invocation> {
        let limit = self
            .limit
            .as_deref()
            .map(|raw| parse_positive_integer(raw, "limit"))
            .transpose()?;
        let sitemap = self
            .sitemap
            .as_deref()
            .map(|raw| parse_choice::<SitemapMode>(raw, "sitemap option"))
            .transpose()?;

        Ok(Invocation::Map(MapRequest {
            url: self.url,
            limit,
            search: self.search.filter(|s| !s.is_empty()),
            include_subdomains: self.include_subdomains.then_some(true),
            sitemap,
        }))
    }
}

pub async fn run(request: &MapRequest, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let reporter = ctx.reporter;
    reporter.status(format!("Mapping {}...", request.url));
    if let Some(search) = &request.search {
        reporter.detail(format!("Filtering URLs by \"{}\"", search));
    }

    let links = ctx.client.map_site(request).await?;
    let outcome = normalize_map(&request.url, &links);

    reporter.success(format!("Mapped {}", plural(outcome.count(), "URL")));
    render(&outcome, ctx.mode, out)?;
    Ok(())
}
