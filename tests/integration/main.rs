//! Integration tests against a mock Firecrawl server
//!
//! These tests use wiremock to stand in for the Firecrawl API and drive the
//! HTTP client and the command orchestrators end-to-end.

mod client_tests;
mod command_tests;

use firecrawl_cli::client::Polling;
use firecrawl_cli::HttpClient;
use std::time::Duration;
use wiremock::MockServer;

pub const API_KEY: &str = "fc-test-key";

/// Creates a client pointed at the mock server
pub fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&server.uri(), API_KEY).unwrap()
}

/// Polling fast enough for tests
pub fn fast_polling() -> Polling {
    Polling {
        interval: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    }
}
