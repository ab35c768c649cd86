//! reqwest-backed implementation of the Firecrawl API

use crate::client::error::{ApiError, ApiResult};
use crate::client::types::{
    AgentJob, AgentRequest, AgentStatusResponse, CrawlJob, CrawlRequest, CrawlStatusResponse,
    Document, JobStarted, JobStatus, MapLink, MapRequest, MapResponse, Polling, ScrapeRequest,
    ScrapeResponse, SearchRequest, SearchResponse,
};
use crate::client::Firecrawl;
use crate::ConfigError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Firecrawl API client speaking JSON over HTTPS
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpClient {
    /// Builds a client for the API rooted at `api_url`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use firecrawl_cli::client::HttpClient;
    ///
    /// let client = HttpClient::new("https://api.firecrawl.dev", "fc-your-key").unwrap();
    /// ```
    pub fn new(api_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(api_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid API URL '{}': {}", api_url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("firecrawl-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        decode(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        decode(resp).await
    }

    /// Submits an asynchronous job and returns its id
    async fn start_job<B: Serialize + Sync>(&self, path: &str, body: &B) -> ApiResult<String> {
        let started: JobStarted = self.post(path, body).await?;
        if started.success == Some(false) {
            return Err(ApiError::Rejected(
                started.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }
        started
            .id
            .ok_or_else(|| ApiError::Parse("job response did not include an id".to_string()))
    }

    /// Polls `url` until the job reaches a terminal status or `deadline` passes
    async fn wait_for_job<T>(
        &self,
        job: &str,
        url: Url,
        polling: &Polling,
        deadline: Instant,
        status_of: fn(&T) -> JobStatus,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        loop {
            let current: T = self.get_before(job, url.clone(), polling, deadline).await?;
            let status = status_of(&current);
            if status.is_terminal() {
                return Ok(current);
            }
            tracing::debug!(job, status = status.as_str(), "Job still in progress");

            let now = Instant::now();
            if now >= deadline {
                return Err(timed_out(job, polling));
            }
            tokio::time::sleep(polling.interval.min(deadline - now)).await;
        }
    }

    /// GET that fails with a timeout once `deadline` passes
    async fn get_before<T: DeserializeOwned>(
        &self,
        job: &str,
        url: Url,
        polling: &Polling,
        deadline: Instant,
    ) -> ApiResult<T> {
        tokio::time::timeout_at(deadline, self.get(url))
            .await
            .map_err(|_| timed_out(job, polling))?
    }

    /// Parses a pagination link, refusing hosts other than the API's
    fn next_page_url(&self, link: &str) -> ApiResult<Url> {
        let url = Url::parse(link)?;
        if url.origin() != self.base_url.origin() {
            return Err(ApiError::Parse(format!(
                "pagination link points outside the API host: {}",
                link
            )));
        }
        Ok(url)
    }
}

fn timed_out(job: &str, polling: &Polling) -> ApiError {
    ApiError::Timeout {
        job: job.to_string(),
        seconds: polling.timeout.as_secs(),
    }
}

/// Checks the HTTP status and deserializes the body
async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Prefers the JSON `error` field of an error body over the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn rejected(error: Option<String>) -> ApiError {
    ApiError::Rejected(error.unwrap_or_else(|| "Unknown error".to_string()))
}

#[async_trait]
impl Firecrawl for HttpClient {
    async fn scrape_url(&self, request: &ScrapeRequest) -> ApiResult<Document> {
        let resp: ScrapeResponse = self.post("v2/scrape", request).await?;
        if resp.success == Some(false) {
            return Err(rejected(resp.error));
        }
        Ok(resp.data.unwrap_or_default())
    }

    async fn search_web(&self, request: &SearchRequest) -> ApiResult<Vec<Value>> {
        let resp: SearchResponse = self.post("v2/search", request).await?;
        if resp.success == Some(false) {
            return Err(rejected(resp.error));
        }
        Ok(resp.data.unwrap_or_default().web)
    }

    async fn map_site(&self, request: &MapRequest) -> ApiResult<Vec<MapLink>> {
        let resp: MapResponse = self.post("v2/map", request).await?;
        if resp.success == Some(false) {
            return Err(rejected(resp.error));
        }
        Ok(resp.links)
    }

    async fn crawl_site(&self, request: &CrawlRequest, polling: &Polling) -> ApiResult<CrawlJob> {
        let id = self.start_job("v2/crawl", request).await?;
        tracing::debug!(crawl_id = %id, "Crawl job started, polling for completion");

        // One deadline covers polling and fetching the result pages
        let deadline = Instant::now() + polling.timeout;
        let status_url = self.endpoint(&format!("v2/crawl/{}", id))?;
        let first: CrawlStatusResponse = self
            .wait_for_job("crawl", status_url, polling, deadline, |r: &CrawlStatusResponse| {
                r.status
            })
            .await?;
        tracing::debug!(
            crawl_id = %id,
            status = first.status.as_str(),
            total = first.total,
            completed = first.completed,
            "Crawl job finished"
        );

        let status = first.status;
        let error = first.error;
        let mut pages = first.data;
        let mut next = first.next;

        // Large crawls are paginated; follow `next` until exhausted
        while let Some(link) = next.take() {
            let url = self.next_page_url(&link)?;
            let page: CrawlStatusResponse = self.get_before("crawl", url, polling, deadline).await?;
            tracing::debug!(crawl_id = %id, batch = page.data.len(), "Fetched crawl page batch");
            pages.extend(page.data);
            next = page.next;
        }

        Ok(CrawlJob {
            id,
            status,
            pages,
            error,
        })
    }

    async fn run_agent(&self, request: &AgentRequest, polling: &Polling) -> ApiResult<AgentJob> {
        let id = self.start_job("v2/agent", request).await?;
        tracing::debug!(agent_id = %id, "Agent job started, polling for completion");

        let deadline = Instant::now() + polling.timeout;
        let status_url = self.endpoint(&format!("v2/agent/{}", id))?;
        let finished: AgentStatusResponse = self
            .wait_for_job("agent", status_url, polling, deadline, |r: &AgentStatusResponse| {
                r.status
            })
            .await?;

        Ok(AgentJob {
            id,
            success: finished.success.unwrap_or(true),
            status: finished.status,
            data: finished.data.unwrap_or(Value::Null),
            error: finished.error,
        })
    }
}
