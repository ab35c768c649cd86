//! Search result extraction
//!
//! The search endpoint returns two different item shapes in the same list:
//! a flat web hit (`{url, title, description}`) when only searching, and a
//! scraped document (`{metadata: {url, title, description}, markdown}`)
//! when content was requested. [`classify`] decodes an item into exactly one
//! of those shapes, or [`SearchItem::Unrecognized`].
//!
//! The two signatures are kept disjoint: an item is a document when its
//! `metadata` object carries a `url` key, and a web hit only when it has a
//! top-level string `url` and is not a document. An item matching both
//! signatures therefore resolves to a document.

use serde_json::Value;

pub const UNTITLED: &str = "Untitled";

/// A search item normalized to a single shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedHit {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Scraped markdown, present only for document items with content
    pub body: Option<String>,
}

/// A decoded search item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchItem {
    /// Direct search hit without scraped content
    Web(ExtractedHit),
    /// Search hit that was scraped
    Document(ExtractedHit),
    /// Neither known shape
    Unrecognized,
}

impl SearchItem {
    /// The normalized record, if the item was recognized
    pub fn into_hit(self) -> Option<ExtractedHit> {
        match self {
            Self::Web(hit) | Self::Document(hit) => Some(hit),
            Self::Unrecognized => None,
        }
    }
}

/// Returns true if the item is a scraped document: a `metadata` object containing `url`
pub fn is_document(item: &Value) -> bool {
    item.get("metadata")
        .and_then(Value::as_object)
        .is_some_and(|metadata| metadata.contains_key("url"))
}

/// Returns true if the item is a flat web hit: a top-level string `url`
pub fn is_web_result(item: &Value) -> bool {
    item.get("url").is_some_and(Value::is_string) && !is_document(item)
}

/// Decodes one raw search item
pub fn classify(item: &Value) -> SearchItem {
    if is_document(item) {
        let metadata = &item["metadata"];
        SearchItem::Document(ExtractedHit {
            url: text(metadata, "url").unwrap_or_default().to_string(),
            title: title(metadata),
            description: text(metadata, "description").unwrap_or_default().to_string(),
            body: text(item, "markdown").map(str::to_string),
        })
    } else if is_web_result(item) {
        SearchItem::Web(ExtractedHit {
            url: text(item, "url").unwrap_or_default().to_string(),
            title: title(item),
            description: text(item, "description").unwrap_or_default().to_string(),
            body: None,
        })
    } else {
        SearchItem::Unrecognized
    }
}

/// Extracts a normalized record from either item shape
///
/// Returns `None` for items that match neither shape; callers drop those
/// rather than failing the batch.
pub fn extract_search_result(item: &Value) -> Option<ExtractedHit> {
    classify(item).into_hit()
}

/// Non-empty string field
fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn title(value: &Value) -> String {
    text(value, "title").unwrap_or(UNTITLED).to_string()
}
