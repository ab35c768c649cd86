//! Response normalization
//!
//! Converts API responses into the result model and counts partial
//! failures so the caller can report them. Crawl drops pages without
//! content; search keeps hits whose content could not be scraped, since
//! the title, URL and snippet are still useful on their own.

use crate::client::{Document, MapLink};
use crate::extract::extract_search_result;
use crate::model::{CrawlOutcome, CrawlPage, MapOutcome, PageContent, SearchHit, SearchOutcome};
use crate::parse::ScrapeFormat;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Partial failures found while normalizing a successful response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Crawled pages that came back without content
    pub empty_pages: usize,
    /// Search hits whose content could not be scraped
    pub unscraped_hits: usize,
    /// Response items that matched no known shape or had no URL
    pub unrecognized_items: usize,
}

/// Builds the page content for a scrape of `url`
///
/// The body is the first requested format that produced content.
pub fn normalize_page(url: &str, formats: &[ScrapeFormat], doc: &Document) -> PageContent {
    let body = formats
        .iter()
        .find_map(|format| format_body(*format, doc))
        .unwrap_or_default();

    PageContent {
        url: url.to_string(),
        title: doc.metadata_str("title").map(str::to_string),
        body,
        metadata: doc
            .metadata
            .as_ref()
            .map(flatten_metadata)
            .unwrap_or_default(),
    }
}

fn format_body(format: ScrapeFormat, doc: &Document) -> Option<String> {
    let body = match format {
        ScrapeFormat::Markdown => doc.markdown.clone(),
        ScrapeFormat::Html => doc.html.clone(),
        ScrapeFormat::Links => doc.links.as_ref().map(|links| links.join("\n")),
        ScrapeFormat::Screenshot => doc.screenshot.clone(),
    };
    body.filter(|b| !b.is_empty())
}

/// Flattens page metadata into string values
///
/// Strings and nulls are kept, numbers and booleans stringified, arrays of
/// strings joined with `", "`; anything else is kept as compact JSON.
pub fn flatten_metadata(metadata: &Map<String, Value>) -> BTreeMap<String, Option<String>> {
    metadata
        .iter()
        .map(|(key, value)| {
            let flat = match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Bool(b) => Some(b.to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Array(items) if items.iter().all(Value::is_string) => Some(
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
                other => Some(other.to_string()),
            };
            (key.clone(), flat)
        })
        .collect()
}

/// Builds the search outcome from raw web result items
///
/// Items that cannot be extracted, or have no URL, are dropped and counted.
/// When `scraped` is set, hits without content are kept and counted.
pub fn normalize_search(query: &str, items: &[Value], scraped: bool) -> (SearchOutcome, Diagnostics) {
    let mut diagnostics = Diagnostics::default();
    let mut hits = Vec::with_capacity(items.len());

    for item in items {
        let Some(extracted) = extract_search_result(item).filter(|hit| !hit.url.is_empty()) else {
            diagnostics.unrecognized_items += 1;
            continue;
        };

        let body = if scraped { extracted.body } else { None };
        if scraped && body.is_none() {
            diagnostics.unscraped_hits += 1;
        }

        hits.push(SearchHit {
            title: extracted.title,
            url: extracted.url,
            snippet: extracted.description,
            body,
        });
    }

    let outcome = SearchOutcome {
        query: query.to_string(),
        hits,
    };
    (outcome, diagnostics)
}

/// Builds the map outcome, keeping the server's order and duplicates
pub fn normalize_map(base_url: &str, links: &[MapLink]) -> MapOutcome {
    let urls = links.iter().map(|link| link.url().to_string()).collect();
    MapOutcome::new(base_url, urls)
}

/// Builds the crawl outcome, excluding pages without content
pub fn normalize_crawl(base_url: &str, docs: &[Document]) -> (CrawlOutcome, Diagnostics) {
    let mut diagnostics = Diagnostics::default();
    let mut pages = Vec::with_capacity(docs.len());

    for doc in docs {
        let body = doc.markdown.clone().unwrap_or_default();
        if body.is_empty() {
            diagnostics.empty_pages += 1;
            continue;
        }

        let url = doc
            .metadata_str("url")
            .or_else(|| doc.metadata_str("sourceURL"))
            .unwrap_or("unknown");

        pages.push(CrawlPage {
            url: url.to_string(),
            title: doc
                .metadata_str("title")
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            body,
        });
    }

    (CrawlOutcome::new(base_url, pages), diagnostics)
}
