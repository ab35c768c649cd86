use crate::config::types::{Config, Settings};
use crate::config::validation::{validate, validate_api_url};
use crate::config::{API_KEY_VAR, API_URL_VAR, DEFAULT_API_URL};
use crate::ConfigError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-user configuration directory, `~/.config/firecrawl`
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("firecrawl"))
}

/// Loads and validates the settings file at `path`
///
/// A missing file yields the default settings.
///
/// # Returns
///
/// * `Ok(Settings)` - Parsed and validated settings
/// * `Err(ConfigError)` - The file exists but could not be read, parsed or validated
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: Settings = toml::from_str(&content)?;
    validate(&settings)?;

    Ok(settings)
}

/// Reads `KEY=value` pairs from a dotenv file without touching the process environment
///
/// A missing file yields no variables.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let env_error = |e: dotenvy::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    dotenvy::from_path_iter(path)
        .map_err(env_error)?
        .map(|item| item.map_err(env_error))
        .collect()
}

/// Resolves the configuration from explicit environment values and a config directory
///
/// Environment values win over the env file, which wins over `config.toml`.
///
/// # Arguments
///
/// * `env_api_key` - Value of `FIRECRAWL_API_KEY`, if set
/// * `env_api_url` - Value of `FIRECRAWL_API_URL`, if set
/// * `config_dir` - Directory holding `.env` and `config.toml`, if known
pub fn resolve_config(
    env_api_key: Option<String>,
    env_api_url: Option<String>,
    config_dir: Option<&Path>,
) -> Result<Config, ConfigError> {
    let non_empty = |value: &String| !value.trim().is_empty();
    let env_api_key = env_api_key.filter(non_empty);
    let env_api_url = env_api_url.filter(non_empty);

    let (mut env_file, settings) = match config_dir {
        Some(dir) => {
            let env_file = if env_api_key.is_none() || env_api_url.is_none() {
                read_env_file(&dir.join(".env"))?
            } else {
                HashMap::new()
            };
            (env_file, load_settings(&dir.join("config.toml"))?)
        }
        None => (HashMap::new(), Settings::default()),
    };

    let api_key = env_api_key
        .or_else(|| env_file.remove(API_KEY_VAR).filter(non_empty))
        .ok_or(ConfigError::MissingApiKey)?;

    let api_url = env_api_url
        .or_else(|| env_file.remove(API_URL_VAR).filter(non_empty))
        .or(settings.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    validate_api_url(&api_url)?;

    Ok(Config {
        api_key,
        api_url,
        crawl_polling: settings.polling.crawl(),
        agent_polling: settings.polling.agent(),
    })
}

/// Resolves the configuration from the process environment and `~/.config/firecrawl`
pub fn load_config() -> Result<Config, ConfigError> {
    let config_dir = default_config_dir();
    tracing::debug!(config_dir = ?config_dir, "Resolving configuration");

    resolve_config(
        std::env::var(API_KEY_VAR).ok(),
        std::env::var(API_URL_VAR).ok(),
        config_dir.as_deref(),
    )
}
