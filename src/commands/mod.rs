//! Command orchestrators
//!
//! One module per operation. Each follows the same sequence: the arguments
//! are validated into a typed request (before any credential lookup or
//! network call), then [`execute`] emits a started notice, calls the API,
//! normalizes the response, warns about partial failures, emits a completed
//! notice and renders the outcome.

pub mod agent;
pub mod crawl;
pub mod map;
pub mod scrape;
pub mod search;

use crate::client::{
    AgentRequest, CrawlRequest, Firecrawl, MapRequest, Polling, ScrapeRequest, SearchRequest,
};
use crate::output::OutputMode;
use crate::report::Reporter;
use crate::Result;
use std::io::Write;

/// A validated command, ready to be sent to the API
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Scrape(ScrapeRequest),
    Search(SearchRequest),
    Map(MapRequest),
    Crawl(CrawlRequest),
    Agent(AgentRequest),
}

/// Everything an orchestrator needs besides its request
pub struct Context<'a> {
    pub client: &'a dyn Firecrawl,
    pub reporter: &'a Reporter,
    pub mode: OutputMode,
    pub crawl_polling: Polling,
    pub agent_polling: Polling,
}

/// Runs a validated command, writing its result to `out`
///
/// Any failure is reported as an error notice before being returned; no
/// partial result is rendered.
pub async fn execute(invocation: &Invocation, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let result = match invocation {
        Invocation::Scrape(request) => scrape::run(request, ctx, out).await,
        Invocation::Search(request) => search::run(request, ctx, out).await,
        Invocation::Map(request) => map::run(request, ctx, out).await,
        Invocation::Crawl(request) => crawl::run(request, ctx, out).await,
        Invocation::Agent(request) => agent::run(request, ctx, out).await,
    };

    if let Err(err) = &result {
        tracing::debug!(error = ?err, "Command failed");
        ctx.reporter.error(err.to_string());
    }
    result
}
