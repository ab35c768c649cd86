use crate::{client_for, fast_polling, API_KEY};
use firecrawl_cli::client::{
    AgentRequest, ApiError, CrawlRequest, Firecrawl, JobStatus, MapRequest, Polling,
    ScrapeOptions, ScrapeRequest, SearchRequest,
};
use firecrawl_cli::parse::ScrapeFormat;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn crawl_request(url: &str) -> CrawlRequest {
    CrawlRequest {
        url: url.to_string(),
        limit: 50,
        max_discovery_depth: 3,
        scrape_options: ScrapeOptions::markdown(),
    }
}

#[tokio::test]
async fn test_scrape_sends_authenticated_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(body_json(json!({
            "url": "https://example.com",
            "formats": ["markdown", "links"],
            "onlyMainContent": true,
            "maxAge": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "markdown": "# Example",
                "links": ["https://example.com/about"],
                "metadata": {"title": "Example", "url": "https://example.com"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ScrapeRequest {
        url: "https://example.com".to_string(),
        formats: vec![ScrapeFormat::Markdown, ScrapeFormat::Links],
        only_main_content: Some(true),
        wait_for: None,
        max_age: Some(0),
    };
    let doc = client_for(&server).scrape_url(&request).await.unwrap();

    assert_eq!(doc.markdown.as_deref(), Some("# Example"));
    assert_eq!(doc.metadata_str("title"), Some("Example"));
}

#[tokio::test]
async fn test_error_status_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/search"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "success": false,
            "error": "Insufficient credits"
        })))
        .mount(&server)
        .await;

    let request = SearchRequest {
        query: "rust".to_string(),
        limit: None,
        location: None,
        scrape_options: None,
    };
    let err = client_for(&server).search_web(&request).await.unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 402);
            assert_eq!(message, "Insufficient credits");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_map_accepts_both_link_shapes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": [
                "https://example.com/a",
                {"url": "https://example.com/b", "title": "B"}
            ]
        })))
        .mount(&server)
        .await;

    let request = MapRequest {
        url: "https://example.com".to_string(),
        limit: None,
        search: None,
        include_subdomains: None,
        sitemap: None,
    };
    let links = client_for(&server).map_site(&request).await.unwrap();

    let urls: Vec<_> = links.iter().map(|link| link.url()).collect();
    assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b"]);
}

#[tokio::test]
async fn test_crawl_polls_and_follows_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .and(body_json(json!({
            "url": "https://example.com",
            "limit": 50,
            "maxDiscoveryDepth": 3,
            "scrapeOptions": {"formats": ["markdown"]}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "crawl-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Second batch, reached through `next`
    Mock::given(method("GET"))
        .and(path("/v2/crawl/crawl-1"))
        .and(query_param("skip", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [{"markdown": "Page two", "metadata": {"url": "https://example.com/two"}}]
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // First poll sees the job still running
    Mock::given(method("GET"))
        .and(path("/v2/crawl/crawl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "scraping",
            "total": 2,
            "completed": 0,
            "data": []
        })))
        .up_to_n_times(1)
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/crawl/crawl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "total": 2,
            "completed": 2,
            "data": [{"markdown": "Page one", "metadata": {"url": "https://example.com/one"}}],
            "next": format!("{}/v2/crawl/crawl-1?skip=1", server.uri())
        })))
        .with_priority(3)
        .mount(&server)
        .await;

    let job = client_for(&server)
        .crawl_site(&crawl_request("https://example.com"), &fast_polling())
        .await
        .unwrap();

    assert_eq!(job.id, "crawl-1");
    assert_eq!(job.status, JobStatus::Completed);
    let bodies: Vec<_> = job.pages.iter().filter_map(|p| p.markdown.as_deref()).collect();
    assert_eq!(bodies, vec!["Page one", "Page two"]);
}

#[tokio::test]
async fn test_crawl_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "slow"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/crawl/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "scraping"})))
        .mount(&server)
        .await;

    let polling = Polling {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(50),
    };
    let err = client_for(&server)
        .crawl_site(&crawl_request("https://example.com"), &polling)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout { ref job, .. } if job == "crawl"));
}

#[tokio::test]
async fn test_endless_pagination_hits_the_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "loop"})),
        )
        .mount(&server)
        .await;

    // Every batch links back to itself
    Mock::given(method("GET"))
        .and(path("/v2/crawl/loop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [{"markdown": "Again", "metadata": {"url": "https://example.com/"}}],
            "next": format!("{}/v2/crawl/loop", server.uri())
        })))
        .mount(&server)
        .await;

    let polling = Polling {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(300),
    };
    let client = client_for(&server);
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.crawl_site(&crawl_request("https://example.com"), &polling),
    )
    .await
    .expect("crawl should stop at its own timeout");

    assert!(matches!(result, Err(ApiError::Timeout { ref job, .. }) if job == "crawl"));
}

#[tokio::test]
async fn test_pagination_to_foreign_host_is_refused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "crawl-2"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/crawl/crawl-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [],
            "next": "https://collector.example.com/v2/crawl/crawl-2?skip=1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .crawl_site(&crawl_request("https://example.com"), &fast_polling())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_agent_rejected_at_submission() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid schema"
        })))
        .mount(&server)
        .await;

    let request = AgentRequest {
        prompt: "Find the pricing".to_string(),
        urls: None,
        schema: None,
        strict_constrain_to_urls: None,
    };
    let err = client_for(&server)
        .run_agent(&request, &fast_polling())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request rejected: Invalid schema");
}

#[tokio::test]
async fn test_agent_polls_until_completed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/agent"))
        .and(body_json(json!({
            "prompt": "Find the pricing",
            "urls": ["https://example.com/pricing"],
            "strictConstrainToURLs": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "agent-1"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/agent/agent-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "processing"})))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/agent/agent-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": {"tiers": ["free", "pro"]}
        })))
        .mount(&server)
        .await;

    let request = AgentRequest {
        prompt: "Find the pricing".to_string(),
        urls: Some(vec!["https://example.com/pricing".to_string()]),
        schema: None,
        strict_constrain_to_urls: Some(true),
    };
    let job = client_for(&server)
        .run_agent(&request, &fast_polling())
        .await
        .unwrap();

    assert!(job.succeeded());
    assert_eq!(job.data, json!({"tiers": ["free", "pro"]}));
}
