//! Result model
//!
//! Each command produces one outcome value, built once from the API
//! response and never mutated afterwards. The outcomes are independent of
//! the wire format and serialize with camelCase keys in declaration order.

mod normalize;

pub use normalize::{
    flatten_metadata, normalize_crawl, normalize_map, normalize_page, normalize_search,
    Diagnostics,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One fetched page's normalized content
///
/// `body` is an empty string, never absent, when nothing was retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, Option<String>>,
}

/// One entry in a search result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Scraped content, only when the search asked for it and it resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// URLs discovered on a site, in server order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MapOutcomeRepr", try_from = "MapOutcomeRepr")]
pub struct MapOutcome {
    base_url: String,
    urls: Vec<String>,
}

impl MapOutcome {
    pub fn new(base_url: impl Into<String>, urls: Vec<String>) -> Self {
        Self {
            base_url: base_url.into(),
            urls,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn count(&self) -> usize {
        self.urls.len()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapOutcomeRepr {
    base_url: String,
    urls: Vec<String>,
    count: usize,
}

impl From<MapOutcome> for MapOutcomeRepr {
    fn from(outcome: MapOutcome) -> Self {
        Self {
            count: outcome.count(),
            base_url: outcome.base_url,
            urls: outcome.urls,
        }
    }
}

impl TryFrom<MapOutcomeRepr> for MapOutcome {
    type Error = String;

    fn try_from(repr: MapOutcomeRepr) -> Result<Self, Self::Error> {
        check_count(repr.count, repr.urls.len())?;
        Ok(Self::new(repr.base_url, repr.urls))
    }
}

/// A crawled page; pages without content never make it into an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlPage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CrawlOutcomeRepr", try_from = "CrawlOutcomeRepr")]
pub struct CrawlOutcome {
    base_url: String,
    pages: Vec<CrawlPage>,
}

impl CrawlOutcome {
    pub fn new(base_url: impl Into<String>, pages: Vec<CrawlPage>) -> Self {
        Self {
            base_url: base_url.into(),
            pages,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pages(&self) -> &[CrawlPage] {
        &self.pages
    }

    pub fn count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrawlOutcomeRepr {
    base_url: String,
    pages: Vec<CrawlPage>,
    count: usize,
}

impl From<CrawlOutcome> for CrawlOutcomeRepr {
    fn from(outcome: CrawlOutcome) -> Self {
        Self {
            count: outcome.count(),
            base_url: outcome.base_url,
            pages: outcome.pages,
        }
    }
}

impl TryFrom<CrawlOutcomeRepr> for CrawlOutcome {
    type Error = String;

    fn try_from(repr: CrawlOutcomeRepr) -> Result<Self, Self::Error> {
        check_count(repr.count, repr.pages.len())?;
        Ok(Self::new(repr.base_url, repr.pages))
    }
}

fn check_count(count: usize, len: usize) -> Result<(), String> {
    if count != len {
        return Err(format!("count is {} but {} entries are present", count, len));
    }
    Ok(())
}

/// Payload of an agent session; its shape is up to the schema or the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub prompt: String,
    pub data: Value,
}
