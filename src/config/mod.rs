//! Configuration module for the Firecrawl CLI
//!
//! This module resolves everything a command needs before it can reach the
//! API: the API key, the API base URL and the polling parameters for
//! long-running jobs. Values come from, in order of precedence:
//! - the `FIRECRAWL_API_KEY` / `FIRECRAWL_API_URL` environment variables
//! - the per-user env file `~/.config/firecrawl/.env`
//! - the optional settings file `~/.config/firecrawl/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use firecrawl_cli::config::load_config;
//!
//! let config = load_config().unwrap();
//! println!("Using API at {}", config.api_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, PollingSettings, Settings};

// Re-export parser functions
pub use parser::{default_config_dir, load_config, load_settings, read_env_file, resolve_config};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "FIRECRAWL_API_KEY";

/// Environment variable overriding the API base URL
pub const API_URL_VAR: &str = "FIRECRAWL_API_URL";

pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";
