//! Argument parsing with built-in validation
//!
//! Every command option arrives as a raw string. The functions here turn
//! those strings into typed, range-checked values and fail with an
//! [`InvalidArgument`] naming the field, the offending value and what was
//! expected, so the caller can report it verbatim.

mod options;

pub use options::{
    Choice, ScrapeFormat, SitemapMode, AGENT_TIMEOUT, CRAWL_TIMEOUT, DEFAULT_CRAWL_DEPTH,
    DEFAULT_CRAWL_LIMIT, POLL_INTERVAL,
};

use crate::{Expected, InvalidArgument};

/// Parses a base-10 integer strictly: digits only, optional leading `+`
fn parse_digits(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses a string to a positive integer
///
/// # Examples
///
/// ```
/// use firecrawl_cli::parse::parse_positive_integer;
///
/// assert_eq!(parse_positive_integer("25", "limit").unwrap(), 25);
/// assert!(parse_positive_integer("0", "limit").is_err());
/// ```
pub fn parse_positive_integer(raw: &str, field: &str) -> Result<u64, InvalidArgument> {
    match parse_digits(raw) {
        Some(value) if value > 0 => Ok(value),
        _ => Err(InvalidArgument {
            field: field.to_string(),
            value: raw.to_string(),
            expected: Expected::PositiveInteger,
        }),
    }
}

/// Parses a string to an integer that may be zero
pub fn parse_non_negative_integer(raw: &str, field: &str) -> Result<u64, InvalidArgument> {
    parse_digits(raw).ok_or_else(|| InvalidArgument {
        field: field.to_string(),
        value: raw.to_string(),
        expected: Expected::NonNegativeInteger,
    })
}

/// Parses an optional positive integer, falling back to `default` when absent
pub fn parse_optional_integer(
    raw: Option<&str>,
    default: u64,
    field: &str,
) -> Result<u64, InvalidArgument> {
    match raw {
        None => Ok(default),
        Some(raw) => parse_positive_integer(raw, field),
    }
}

/// Parses a comma-separated list of enumerated tokens
///
/// Tokens are trimmed and lower-cased; order is preserved. The first token
/// outside the allowed set fails the whole list.
pub fn parse_choice_list<T: Choice>(raw: &str, field: &str) -> Result<Vec<T>, InvalidArgument> {
    raw.split(',')
        .map(|token| lookup(&token.trim().to_lowercase(), field))
        .collect()
}

/// Parses a single enumerated token, case-insensitively
pub fn parse_choice<T: Choice>(raw: &str, field: &str) -> Result<T, InvalidArgument> {
    lookup::<T>(&raw.trim().to_lowercase(), field).map_err(|mut err| {
        err.value = raw.to_string();
        err
    })
}

fn lookup<T: Choice>(token: &str, field: &str) -> Result<T, InvalidArgument> {
    T::ALL
        .iter()
        .copied()
        .find(|choice| choice.as_str() == token)
        .ok_or_else(|| InvalidArgument {
            field: field.to_string(),
            value: token.to_string(),
            expected: Expected::OneOf(T::tokens()),
        })
}

/// Parses a comma-separated list of URLs
///
/// Whitespace is trimmed and empty entries dropped. The URLs themselves are
/// not validated; the API rejects anything it cannot fetch.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}
