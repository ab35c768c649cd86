use crate::config::types::{PollingSettings, Settings};
use crate::ConfigError;
use url::Url;

/// Validates the settings file contents
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if let Some(api_url) = &settings.api_url {
        validate_api_url(api_url)?;
    }
    validate_polling(&settings.polling)?;
    Ok(())
}

/// Validates an API base URL: absolute, http or https
pub fn validate_api_url(api_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(api_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-url '{}': {}", api_url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "api-url '{}' must use http or https",
            api_url
        )));
    }

    Ok(())
}

/// Validates polling settings
fn validate_polling(polling: &PollingSettings) -> Result<(), ConfigError> {
    if polling.interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "interval-secs must be >= 1, got {}",
            polling.interval_secs
        )));
    }

    for (name, timeout) in [
        ("crawl-timeout-secs", polling.crawl_timeout_secs),
        ("agent-timeout-secs", polling.agent_timeout_secs),
    ] {
        if timeout < polling.interval_secs {
            return Err(ConfigError::Validation(format!(
                "{} must be >= interval-secs ({}), got {}",
                name, polling.interval_secs, timeout
            )));
        }
    }

    Ok(())
}
