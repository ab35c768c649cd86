use crate::client::Polling;
use crate::parse::{AGENT_TIMEOUT, CRAWL_TIMEOUT, POLL_INTERVAL};
use serde::Deserialize;
use std::time::Duration;

/// Everything a command needs to reach the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub crawl_polling: Polling,
    pub agent_polling: Polling,
}

/// Contents of the optional `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Base URL of the API (e.g., a self-hosted instance)
    #[serde(rename = "api-url")]
    pub api_url: Option<String>,

    #[serde(default)]
    pub polling: PollingSettings,
}

/// Polling behavior for crawl and agent jobs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// Seconds between status checks
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// Seconds before a crawl job is abandoned
    #[serde(rename = "crawl-timeout-secs")]
    pub crawl_timeout_secs: u64,

    /// Seconds before an agent job is abandoned
    #[serde(rename = "agent-timeout-secs")]
    pub agent_timeout_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: POLL_INTERVAL.as_secs(),
            crawl_timeout_secs: CRAWL_TIMEOUT.as_secs(),
            agent_timeout_secs: AGENT_TIMEOUT.as_secs(),
        }
    }
}

impl PollingSettings {
    pub fn crawl(&self) -> Polling {
        Polling {
            interval: Duration::from_secs(self.interval_secs),
            timeout: Duration::from_secs(self.crawl_timeout_secs),
        }
    }

    pub fn agent(&self) -> Polling {
        Polling {
            interval: Duration::from_secs(self.interval_secs),
            timeout: Duration::from_secs(self.agent_timeout_secs),
        }
    }
}
