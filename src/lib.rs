//! Firecrawl CLI: scrape, search, map, crawl and agent requests from the terminal
//!
//! This crate validates command-line input, hands requests to the Firecrawl
//! API, normalizes the loosely-typed responses into a small result model and
//! renders them either as JSON or as human-readable markdown.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod extract;
pub mod model;
pub mod output;
pub mod parse;
pub mod report;

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a CLI invocation
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] client::ApiError),

    #[error("{0}")]
    OperationFailed(String),

    #[error(transparent)]
    Output(#[from] output::OutputError),
}

impl CliError {
    /// Process exit status for this error
    ///
    /// Setup and validation problems exit with 2, anything that went wrong
    /// while talking to the API (or writing its results) exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) | Self::Config(_) => 2,
            Self::Api(_) | Self::OperationFailed(_) | Self::Output(_) => 1,
        }
    }
}

/// What an argument was expected to look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    PositiveInteger,
    NonNegativeInteger,
    OneOf(Vec<&'static str>),
}

/// A malformed or out-of-range command-line value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument {
    pub field: String,
    pub value: String,
    pub expected: Expected,
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Expected::PositiveInteger => write!(
                f,
                "{} must be a positive integer, got: {}",
                self.field, self.value
            ),
            Expected::NonNegativeInteger => write!(
                f,
                "{} must be a non-negative integer, got: {}",
                self.field, self.value
            ),
            Expected::OneOf(allowed) => write!(
                f,
                "Invalid {}: \"{}\". Valid {}s: {}",
                self.field,
                self.value,
                self.field,
                allowed.join(", ")
            ),
        }
    }
}

impl std::error::Error for InvalidArgument {}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{} environment variable is not set.\n\n\
         To get an API key:\n\
         1. Sign up at https://firecrawl.dev\n\
         2. Copy your API key from the dashboard\n\
         3. Set the environment variable:\n   \
         export {}=your_key_here",
        config::API_KEY_VAR,
        config::API_KEY_VAR
    )]
    MissingApiKey,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read env file {path}: {message}")]
    EnvFile { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Failed to load schema file: {0}")]
    Schema(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{Firecrawl, HttpClient};
pub use config::Config;
pub use output::OutputMode;
pub use report::{Reporter, ReportingConfig};
