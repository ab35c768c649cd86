//! Command-line surface
//!
//! Numeric and enumerated options are taken as raw strings and checked by
//! the [`parse`](crate::parse) module, so malformed values produce an
//! argument error (exit 2) with the same wording for every command.

use crate::commands::agent::AgentArgs;
use crate::commands::crawl::CrawlArgs;
use crate::commands::map::MapArgs;
use crate::commands::scrape::ScrapeArgs;
use crate::commands::search::SearchArgs;
use crate::commands::Invocation;
use crate::output::OutputMode;
use crate::report::ReportingConfig;
use crate::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "firecrawl")]
#[command(version)]
#[command(
    about = "CLI tool for Firecrawl API - scrape, search, map, crawl, and AI-powered data gathering",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress progress output (errors are still shown)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show detailed progress
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    Scrape(ScrapeArgs),
    Search(SearchArgs),
    Map(MapArgs),
    Crawl(CrawlArgs),
    Agent(AgentArgs),
}

impl Command {
    /// Checks the arguments and builds the request to send
    pub fn validate(self) -> Result<Invocation> {
        match self {
            Self::Scrape(args) => args.validate(),
            Self::Search(args) => args.validate(),
            Self::Map(args) => args.validate(),
            Self::Crawl(args) => args.validate(),
            Self::Agent(args) => args.validate(),
        }
    }
}

impl Cli {
    pub fn reporting(&self) -> ReportingConfig {
        ReportingConfig {
            suppress_progress: self.quiet,
            verbose: self.verbose,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_json_flag(self.json)
    }
}
