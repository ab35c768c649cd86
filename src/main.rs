//! Firecrawl CLI main entry point
//!
//! Parses arguments, validates them into a request, resolves credentials and
//! runs the command against the Firecrawl API.

use clap::Parser;
use firecrawl_cli::cli::Cli;
use firecrawl_cli::commands::{self, Context};
use firecrawl_cli::config::load_config;
use firecrawl_cli::{CliError, HttpClient, Reporter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let reporter = Reporter::new(cli.reporting());
    let mode = cli.output_mode();

    // Arguments are checked before any credential lookup or network call
    let invocation = match cli.command.validate() {
        Ok(invocation) => invocation,
        Err(e) => return fail(&reporter, e),
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => return fail(&reporter, e.into()),
    };
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let client = match HttpClient::new(&config.api_url, &config.api_key) {
        Ok(client) => client,
        Err(e) => return fail(&reporter, e.into()),
    };

    let ctx = Context {
        client: &client,
        reporter: &reporter,
        mode,
        crawl_polling: config.crawl_polling,
        agent_polling: config.agent_polling,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::execute(&invocation, &ctx, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported by the orchestrator
        Err(e) => ExitCode::from(e.exit_code()),
    }
}

fn fail(reporter: &Reporter, err: CliError) -> ExitCode {
    reporter.error(err.to_string());
    ExitCode::from(err.exit_code())
}

/// Logs go to stderr; stdout is reserved for results
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("firecrawl_cli=debug,warn")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
