use crate::client::AgentRequest;
use crate::commands::{Context, Invocation};
use crate::model::AgentOutcome;
use crate::output::render;
use crate::parse::parse_url_list;
use crate::{CliError, ConfigError, Result};
use clap::Args;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

const PROMPT_PREVIEW_CHARS: usize = 50;

/// Gather data with a natural-language agent session
#[derive(Debug, Clone, Args)]
pub struct AgentArgs {
    /// What the agent should find or extract
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// Comma-separated URLs to focus the agent on
    #[arg(long = "url", value_name = "URLS")]
    pub urls: Option<String>,

    /// Path to a JSON schema describing the structured output
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Only visit the given URLs
    #[arg(long)]
    pub strict: bool,
}

impl AgentArgs {
    pub fn validate(self) -> Result<Invocation> {
        let urls = self
            .urls
            .as_deref()
            .map(parse_url_list)
            .filter(|urls| !urls.is_empty());
        let schema = self.schema.as_deref().map(read_schema).transpose()?;

        Ok(Invocation::Agent(AgentRequest {
            prompt: self.prompt,
            urls,
            schema,
            strict_constrain_to_urls: self.strict.then_some(true),
        }))
    }
}

/// Reads and parses a JSON schema file
fn read_schema(path: &Path) -> std::result::Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Schema(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ConfigError::Schema(format!("{}: {}", path.display(), e)))
}

/// First characters of the prompt, with `...` when it was cut
fn prompt_preview(prompt: &str) -> String {
    if prompt.chars().count() <= PROMPT_PREVIEW_CHARS {
        return prompt.to_string();
    }
    let mut preview: String = prompt.chars().take(PROMPT_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

pub async fn run(request: &AgentRequest, ctx: &Context<'_>, out: &mut dyn Write) -> Result<()> {
    let reporter = ctx.reporter;
    reporter.status(format!(
        "Agent working on: \"{}\"",
        prompt_preview(&request.prompt)
    ));
    if let Some(urls) = &request.urls {
        reporter.detail(format!("Focus URLs: {}", urls.join(", ")));
    }
    reporter.detail(format!(
        "Polling every {}s, timeout {}s",
        ctx.agent_polling.interval.as_secs_f64(),
        ctx.agent_polling.timeout.as_secs()
    ));

    let job = ctx.client.run_agent(request, &ctx.agent_polling).await?;
    if !job.succeeded() {
        return Err(CliError::OperationFailed(format!(
            "Agent failed: {}",
            job.error.as_deref().unwrap_or("Unknown error")
        )));
    }

    reporter.success("Agent completed");
    let outcome = AgentOutcome {
        prompt: request.prompt.clone(),
        data: job.data,
    };
    render(&outcome, ctx.mode, out)?;
    Ok(())
}
