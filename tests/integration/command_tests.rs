use crate::{client_for, fast_polling};
use clap::Parser;
use firecrawl_cli::cli::Cli;
use firecrawl_cli::commands::{execute, Context, Invocation};
use firecrawl_cli::report::Notice;
use firecrawl_cli::{CliError, HttpClient, OutputMode, Reporter, ReportingConfig};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Parses and validates a command line
fn invocation(args: &[&str]) -> Invocation {
    let mut argv = vec!["firecrawl"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().command.validate().unwrap()
}

/// Runs a command against the mock server, returning its result and stdout
async fn run(
    client: &HttpClient,
    reporter: &Reporter,
    mode: OutputMode,
    invocation: &Invocation,
) -> (Result<(), CliError>, String) {
    let ctx = Context {
        client,
        reporter,
        mode,
        crawl_polling: fast_polling(),
        agent_polling: fast_polling(),
    };
    let mut out = Vec::new();
    let result = execute(invocation, &ctx, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

async fn mount_crawl(server: &MockServer, status: Value) {
    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "crawl-1"})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/crawl/crawl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_map_prints_one_url_per_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/map"))
        .and(body_json(json!({"url": "https://example.com", "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": [
                {"url": "https://example.com/a"},
                {"url": "https://example.com/b"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Human,
        &invocation(&["map", "https://example.com", "--limit", "5"]),
    )
    .await;

    result.unwrap();
    assert_eq!(stdout, "https://example.com/a\nhttps://example.com/b\n");
    assert_eq!(
        reporter.notices(),
        vec![
            Notice::Status("Mapping https://example.com...".to_string()),
            Notice::Success("Mapped 2 URLs".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_map_json_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": [{"url": "https://example.com/a"}]
        })))
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig {
        suppress_progress: true,
        verbose: false,
    });
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Structured,
        &invocation(&["map", "https://example.com", "--json", "--quiet"]),
    )
    .await;

    result.unwrap();
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        parsed,
        json!({
            "baseUrl": "https://example.com",
            "urls": ["https://example.com/a"],
            "count": 1
        })
    );
    assert!(reporter.notices().is_empty());
}

#[tokio::test]
async fn test_search_reports_partial_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "web": [
                    {
                        "markdown": "# Rust",
                        "metadata": {"url": "https://rust-lang.org", "title": "Rust"}
                    },
                    {
                        "metadata": {"url": "https://doc.rust-lang.org", "title": "Docs"}
                    },
                    {"unexpected": true}
                ]
            }
        })))
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Structured,
        &invocation(&["search", "rust", "--scrape"]),
    )
    .await;

    result.unwrap();
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    let hits = parsed["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["body"], "# Rust");
    assert!(hits[1].get("body").is_none());

    let notices = reporter.notices();
    assert!(notices.contains(&Notice::Warning(
        "1 result(s) could not be parsed and were skipped".to_string()
    )));
    assert!(notices.contains(&Notice::Warning("Failed to scrape 1 result(s)".to_string())));
    assert!(notices.contains(&Notice::Success("Found 2 results".to_string())));
}

#[tokio::test]
async fn test_crawl_drops_empty_pages() {
    let server = MockServer::start().await;
    mount_crawl(
        &server,
        json!({
            "status": "completed",
            "data": [
                {"markdown": "Hello", "metadata": {"url": "https://example.com/", "title": "Home"}},
                {"markdown": "", "metadata": {"url": "https://example.com/empty"}}
            ]
        }),
    )
    .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Human,
        &invocation(&["crawl", "https://example.com"]),
    )
    .await;

    result.unwrap();
    assert_eq!(
        stdout,
        "# Crawl Results: https://example.com\n\n---\n\n## Page 1: Home\n**URL:** https://example.com/\n\nHello\n\n"
    );

    let notices = reporter.notices();
    assert!(notices.contains(&Notice::Warning("1 page(s) returned empty content".to_string())));
    assert!(notices.contains(&Notice::Success("Crawled 1 page (1 empty)".to_string())));
}

#[tokio::test]
async fn test_failed_crawl_renders_nothing() {
    let server = MockServer::start().await;
    mount_crawl(
        &server,
        json!({"status": "failed", "error": "Site unreachable", "data": []}),
    )
    .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Human,
        &invocation(&["crawl", "https://example.com"]),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(stdout.is_empty());
    assert_eq!(
        reporter.notices().last(),
        Some(&Notice::Error("Crawl job failed: Site unreachable".to_string()))
    );
}

#[tokio::test]
async fn test_failed_agent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "agent-1"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/agent/agent-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "failed"})))
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Structured,
        &invocation(&["agent", "Find the founders"]),
    )
    .await;

    assert!(matches!(result, Err(CliError::OperationFailed(_))));
    assert!(stdout.is_empty());
    assert_eq!(
        reporter.notices(),
        vec![
            Notice::Status("Agent working on: \"Find the founders\"".to_string()),
            Notice::Error("Agent failed: Unknown error".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_agent_structured_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "agent-2"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/agent/agent-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": {"founders": ["Ada", "Grace"]}
        })))
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig::default());
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Structured,
        &invocation(&["agent", "Find the founders", "--json"]),
    )
    .await;

    result.unwrap();
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        parsed,
        json!({"prompt": "Find the founders", "data": {"founders": ["Ada", "Grace"]}})
    );
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Unauthorized: Invalid token"
        })))
        .mount(&server)
        .await;

    let reporter = Reporter::in_memory(ReportingConfig {
        suppress_progress: true,
        verbose: false,
    });
    let (result, stdout) = run(
        &client_for(&server),
        &reporter,
        OutputMode::Human,
        &invocation(&["scrape", "https://example.com"]),
    )
    .await;

    assert_eq!(result.unwrap_err().exit_code(), 1);
    assert!(stdout.is_empty());
    assert_eq!(
        reporter.notices(),
        vec![Notice::Error(
            "API error (status 401): Unauthorized: Invalid token".to_string()
        )]
    );
}
