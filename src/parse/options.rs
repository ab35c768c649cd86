//! Enumerated option values and command defaults

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seconds between status checks for long-running jobs
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Give up on a crawl job after ten minutes
pub const CRAWL_TIMEOUT: Duration = Duration::from_secs(600);

/// Give up on an agent job after five minutes
pub const AGENT_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_CRAWL_LIMIT: u64 = 50;
pub const DEFAULT_CRAWL_DEPTH: u64 = 3;

/// A closed set of lower-case tokens accepted on the command line
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in the order they are listed in help and error text
    const ALL: &'static [Self];

    /// The token accepted on the command line and sent over the wire
    fn as_str(&self) -> &'static str;

    /// All accepted tokens
    fn tokens() -> Vec<&'static str> {
        Self::ALL.iter().map(Choice::as_str).collect()
    }
}

/// Content formats a scrape can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeFormat {
    Markdown,
    Html,
    Links,
    Screenshot,
}

impl Choice for ScrapeFormat {
    const ALL: &'static [Self] = &[Self::Markdown, Self::Html, Self::Links, Self::Screenshot];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Links => "links",
            Self::Screenshot => "screenshot",
        }
    }
}

/// How the map operation treats the site's sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapMode {
    /// Use only URLs listed in the sitemap
    Only,
    /// Combine sitemap URLs with discovered links
    Include,
    /// Ignore the sitemap entirely
    Skip,
}

impl Choice for SitemapMode {
    const ALL: &'static [Self] = &[Self::Only, Self::Include, Self::Skip];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Only => "only",
            Self::Include => "include",
            Self::Skip => "skip",
        }
    }
}
