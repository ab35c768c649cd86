use crate::client::ScrapeRequest;
use crate::commands::{Context, Invocation};
use crate::model::normalize_page;
use crate::output::render;
use crate::parse::{parse_choice_list, parse_non_negative_integer, Choice, ScrapeFormat};
use crate::Result;
use clap::Args;
use std::io::Write;

/// Scrape a single URL and return its content
#[derive(Debug, Clone, Args)]
pub struct ScrapeArgs {
    /// The URL to scrape
    #[arg(value_name = "URL")]
    pub url: String,

    /// Content formats: markdown, html, links, screenshot (default: markdown)
    #[arg(long, allow_hyphen_values = true)]
    pub formats: Option<String>,

    /// Extract only main content, excluding navigation/headers/footers
    #[arg(long)]
    pub only_main: bool,

    /// Additional wait time in ms for JavaScript rendering
    #[arg(long, allow_hyphen_values = true)]
    pub wait: Option<String>,

    /// Force fresh scrape, bypassing the Firecrawl cache
    #[arg(long)]
    pub fresh: bool,
}

impl ScrapeArgs {
    pub fn validate(self) -> Result<Invocation> {
        let formats: Vec<ScrapeFormat> = match &self.formats {
            Some(raw) => parse_choice_list(raw, "format")?,
            None => vec![ScrapeFormat::Markdown],
        };
        let wait_for = self
            .wait
            .as_deref()
            .map(|raw| parse_non_negative_integer(raw, "wait"))
            .transpose()?;

        Ok(Invocation::Scrape(ScrapeRequest {
            url: self.url,
            formats,
            only_main_content: self.only_main.then_some(true),
            wait_for,
            max_age: self.fresh.then_some(0),
        }))
    }
}

pub async fn run(request: &ScrapeRequest, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let reporter = ctx.reporter;
    reporter.status(format!("Scraping {}...", request.url));

    let formats: Vec<_> = request.formats.iter().map(Choice::as_str).collect();
    reporter.detail(format!("Formats: {}", formats.join(", ")));
    if request.max_age == Some(0) {
        reporter.detail("Forcing fresh scrape (bypassing cache)");
    }

    let doc = ctx.client.scrape_url(request).await?;
    let page = normalize_page(&request.url, &request.formats, &doc);

    reporter.success("Scraped 1 page");
    render(&page, ctx.mode, out)?;
    Ok(())
}
