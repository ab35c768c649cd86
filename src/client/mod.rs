//! Firecrawl API client
//!
//! This module handles every network interaction, including:
//! - Building request bodies for the five API operations
//! - Bearer authentication and HTTP error classification
//! - Polling asynchronous crawl and agent jobs to completion
//!
//! Commands only see the [`Firecrawl`] trait, so tests can stand in a mock
//! server (or any other implementation) for the real API.

mod error;
mod http;
mod types;

pub use error::{ApiError, ApiResult};
pub use http::HttpClient;
pub use types::{
    AgentJob, AgentRequest, CrawlJob, CrawlRequest, Document, JobStatus, MapLink, MapRequest,
    Polling, ScrapeOptions, ScrapeRequest, SearchRequest,
};

use async_trait::async_trait;
use serde_json::Value;

/// The remote operations a command can invoke
///
/// Long-running operations block until the job reaches a terminal state
/// or the polling timeout elapses.
#[async_trait]
pub trait Firecrawl: Send + Sync {
    /// Scrapes a single page
    async fn scrape_url(&self, request: &ScrapeRequest) -> ApiResult<Document>;

    /// Runs a web search, returning the raw web result items
    async fn search_web(&self, request: &SearchRequest) -> ApiResult<Vec<Value>>;

    /// Discovers URLs on a site, in server order
    async fn map_site(&self, request: &MapRequest) -> ApiResult<Vec<MapLink>>;

    /// Crawls a site and waits for the job to finish
    async fn crawl_site(&self, request: &CrawlRequest, polling: &Polling) -> ApiResult<CrawlJob>;

    /// Runs an agent session and waits for its answer
    async fn run_agent(&self, request: &AgentRequest, polling: &Polling) -> ApiResult<AgentJob>;
}
