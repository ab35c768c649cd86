//! Output rendering
//!
//! Every outcome renders in one of two modes:
//! - structured: pretty-printed JSON of the whole outcome
//! - human: an operation-specific markdown layout
//!
//! All output goes to the writer handed in by the caller (stdout in the
//! binary) so results can be piped.

mod markdown;

use crate::model::{AgentOutcome, CrawlOutcome, MapOutcome, PageContent, SearchOutcome};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Output rendering selected for an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Structured,
    Human,
}

impl OutputMode {
    /// Structured when `--json` was given
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Structured
        } else {
            Self::Human
        }
    }
}

/// An outcome that knows its human-readable layout
pub trait Render: Serialize {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()>;
}

/// Renders an outcome in the requested mode
pub fn render<R: Render>(outcome: &R, mode: OutputMode, out: &mut dyn Write) -> OutputResult<()> {
    match mode {
        OutputMode::Structured => write_json(outcome, out),
        OutputMode::Human => outcome.render_human(out),
    }?;
    out.flush()?;
    Ok(())
}

/// Writes a value as indented JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(value: &T, out: &mut dyn Write) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

impl Render for PageContent {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()> {
        markdown::write_page(self, out)
    }
}

impl Render for SearchOutcome {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()> {
        markdown::write_search(self, out)
    }
}

impl Render for MapOutcome {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()> {
        markdown::write_map(self, out)
    }
}

impl Render for CrawlOutcome {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()> {
        markdown::write_crawl(self, out)
    }
}

impl Render for AgentOutcome {
    fn render_human(&self, out: &mut dyn Write) -> OutputResult<()> {
        markdown::write_agent(self, out)
    }
}
