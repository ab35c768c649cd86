//! Human-readable layouts
//!
//! Each writer appends its lines straight to the output in display order.

use crate::extract::UNTITLED;
use crate::model::{AgentOutcome, CrawlOutcome, MapOutcome, PageContent, SearchOutcome};
use crate::output::{write_json, OutputResult};
use serde_json::Value;
use std::io::Write;

/// Page body verbatim, nothing else
pub(super) fn write_page(page: &PageContent, out: &mut dyn Write) -> OutputResult<()> {
    writeln!(out, "{}", page.body)?;
    Ok(())
}

/// Full sections for scraped hits, a compact three-line entry otherwise
pub(super) fn write_search(outcome: &SearchOutcome, out: &mut dyn Write) -> OutputResult<()> {
    writeln!(out, "## Search Results for \"{}\"\n", outcome.query)?;

    for (index, hit) in outcome.hits.iter().enumerate() {
        let number = index + 1;
        match &hit.body {
            Some(body) => {
                writeln!(out, "---\n")?;
                writeln!(out, "### Result {}: {}", number, hit.title)?;
                writeln!(out, "**URL:** {}\n", hit.url)?;
                writeln!(out, "{}", body)?;
                writeln!(out)?;
            }
            None => {
                writeln!(out, "{}. **{}**", number, hit.title)?;
                writeln!(out, "   {}", hit.url)?;
                writeln!(out, "   {}\n", hit.snippet)?;
            }
        }
    }

    Ok(())
}

/// One URL per line
pub(super) fn write_map(outcome: &MapOutcome, out: &mut dyn Write) -> OutputResult<()> {
    for url in outcome.urls() {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}

pub(super) fn write_crawl(outcome: &CrawlOutcome, out: &mut dyn Write) -> OutputResult<()> {
    writeln!(out, "# Crawl Results: {}\n", outcome.base_url())?;

    for (index, page) in outcome.pages().iter().enumerate() {
        writeln!(out, "---\n")?;
        writeln!(
            out,
            "## Page {}: {}",
            index + 1,
            page.title.as_deref().unwrap_or(UNTITLED)
        )?;
        writeln!(out, "**URL:** {}\n", page.url)?;
        writeln!(out, "{}", page.body)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Structured payloads stay JSON; scalars get a heading
pub(super) fn write_agent(outcome: &AgentOutcome, out: &mut dyn Write) -> OutputResult<()> {
    match &outcome.data {
        data @ (Value::Object(_) | Value::Array(_)) => write_json(data, out),
        Value::String(text) => write_scalar(text, out),
        scalar => write_scalar(&scalar.to_string(), out),
    }
}

fn write_scalar(text: &str, out: &mut dyn Write) -> OutputResult<()> {
    writeln!(out, "# Agent Results\n")?;
    writeln!(out, "{}", text)?;
    Ok(())
}
