use crate::client::{CrawlRequest, JobStatus, ScrapeOptions};
use crate::commands::{Context, Invocation};
use crate::model::normalize_crawl;
use crate::output::render;
use crate::parse::{parse_optional_integer, DEFAULT_CRAWL_DEPTH, DEFAULT_CRAWL_LIMIT};
use crate::report::plural;
use crate::{CliError, Result};
use clap::Args;
use std::io::Write;

/// Recursively crawl a website
#[derive(Debug, Clone, Args)]
pub struct CrawlArgs {
    /// The starting URL to crawl
    #[arg(value_name = "URL")]
    pub url: String,

    /// Maximum pages to crawl (default: 50)
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    /// Maximum link depth from the starting URL (default: 3)
    #[arg(long, allow_hyphen_values = true)]
    pub depth: Option<String>,
}

impl CrawlArgs {
    pub fn validate(self) -> Result<Invocation> {
        let limit = parse_optional_integer(self.limit.as_deref(), DEFAULT_CRAWL_LIMIT, "limit")?;
        let depth = parse_optional_integer(self.depth.as_deref(), DEFAULT_CRAWL_DEPTH, "depth")?;

        Ok(Invocation::Crawl(CrawlRequest {
            url: self.url,
            limit,
            max_discovery_depth: depth,
            scrape_options: ScrapeOptions::markdown(),
        }))
    }
}

pub async fn run(request: &CrawlRequest, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let reporter = ctx.reporter;
    reporter.status(format!("Crawling {}...", request.url));
    reporter.detail(format!(
        "Limit: {} pages, depth: {}",
        request.limit, request.max_discovery_depth
    ));
    reporter.detail(format!(
        "Polling every {}s, timeout {}s",
        ctx.crawl_polling.interval.as_secs_f64(),
        ctx.crawl_polling.timeout.as_secs()
    ));

    let job = ctx.client.crawl_site(request, &ctx.crawl_polling).await?;
    if matches!(job.status, JobStatus::Failed | JobStatus::Cancelled) {
        let mut message = format!("Crawl job {}", job.status.as_str());
        if let Some(error) = &job.error {
            message.push_str(": ");
            message.push_str(error);
        }
        return Err(CliError::OperationFailed(message));
    }
    reporter.detail(format!("Job {} returned {}", job.id, plural(job.pages.len(), "page")));

    let (outcome, diagnostics) = normalize_crawl(&request.url, &job.pages);
    if diagnostics.empty_pages > 0 {
        reporter.warn(format!(
            "{} page(s) returned empty content",
            diagnostics.empty_pages
        ));
    }

    let mut summary = format!("Crawled {}", plural(outcome.count(), "page"));
    if diagnostics.empty_pages > 0 {
        summary.push_str(&format!(" ({} empty)", diagnostics.empty_pages));
    }
    reporter.success(summary);

    render(&outcome, ctx.mode, out)?;
    Ok(())
}
