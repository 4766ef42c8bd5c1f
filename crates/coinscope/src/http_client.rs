//! Async HTTP fetch capability wrapping reqwest.
//!
//! One attempt per URL: no retries, no backoff. A non-200 status is still
//! returned as a response; deciding that it is a failure is the caller's job.

use async_trait::async_trait;

use crate::error::FetchError;

/// Standard desktop Chrome user-agent. Both sources serve a stripped page
/// to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/131.0.0.0 Safari/537.36";

/// Response from an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can GET a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// reqwest-backed [`Fetcher`].
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client sending `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        tracing::debug!(url, status, bytes = body.len(), "fetched");

        Ok(HttpResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}
