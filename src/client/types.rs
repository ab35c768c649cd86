//! Request bodies and wire responses for the Firecrawl v2 API

use crate::parse::{ScrapeFormat, SitemapMode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// How often to check a long-running job and when to give up on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polling {
    pub interval: Duration,
    pub timeout: Duration,
}

// ===== Requests =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub url: String,
    pub formats: Vec<ScrapeFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    /// Extra milliseconds to let JavaScript render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    /// Maximum acceptable cache age; `Some(0)` forces a fresh fetch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeOptions {
    pub formats: Vec<ScrapeFormat>,
}

impl ScrapeOptions {
    pub fn markdown() -> Self {
        Self {
            formats: vec![ScrapeFormat::Markdown],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
}

impl SearchRequest {
    /// Whether each hit should also be scraped for content
    pub fn scrapes_content(&self) -> bool {
        self.scrape_options.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<SitemapMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    pub url: String,
    pub limit: u64,
    pub max_discovery_depth: u64,
    pub scrape_options: ScrapeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(
        rename = "strictConstrainToURLs",
        skip_serializing_if = "Option::is_none"
    )]
    pub strict_constrain_to_urls: Option<bool>,
}

// ===== Responses =====

/// A scraped document as returned by scrape, crawl and search-with-scrape
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub links: Option<Vec<String>>,
    pub screenshot: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl Document {
    /// Looks up a string-valued metadata field
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key)?.as_str()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeResponse {
    pub success: Option<bool>,
    pub data: Option<Document>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub success: Option<bool>,
    pub data: Option<SearchData>,
    pub error: Option<String>,
}

/// Search results grouped by source; only web results are used
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchData {
    #[serde(default)]
    pub web: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MapResponse {
    pub success: Option<bool>,
    #[serde(default)]
    pub links: Vec<MapLink>,
    pub error: Option<String>,
}

/// One discovered link; older API versions return bare strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MapLink {
    Bare(String),
    /// Object form; `title` and `description` are ignored
    Entry { url: String },
}

impl MapLink {
    pub fn url(&self) -> &str {
        match self {
            Self::Bare(url) => url,
            Self::Entry { url } => url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobStarted {
    pub success: Option<bool>,
    pub id: Option<String>,
    pub error: Option<String>,
}

/// Lifecycle state of an asynchronous crawl or agent job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Scraping,
    Processing,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Returns true once the job will not change any more
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scraping => "scraping",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CrawlStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub data: Vec<Document>,
    pub next: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentStatusResponse {
    pub success: Option<bool>,
    pub status: JobStatus,
    pub data: Option<Value>,
    pub error: Option<String>,
}

/// Final state of a crawl job
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlJob {
    pub id: String,
    pub status: JobStatus,
    pub pages: Vec<Document>,
    pub error: Option<String>,
}

/// Final state of an agent job
#[derive(Debug, Clone, PartialEq)]
pub struct AgentJob {
    pub id: String,
    pub success: bool,
    pub status: JobStatus,
    pub data: Value,
    pub error: Option<String>,
}

impl AgentJob {
    /// Returns true when the agent produced an answer
    pub fn succeeded(&self) -> bool {
        self.success && self.status != JobStatus::Failed && self.status != JobStatus::Cancelled
    }
}
