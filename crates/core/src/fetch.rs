//! Retrieval of the raw page HTML.
//!
//! This module issues the single outbound GET request the pipeline makes
//! per invocation and applies the upstream-response rules: non-2xx statuses
//! and empty bodies are failures, transport errors are internal errors.

use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::{DistillError, Result};

/// User-Agent sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; Distill/1.0)";

/// Accept header sent with every outbound request.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// HTTP client configuration for fetching web pages.
///
/// The configuration is fixed once the [`Fetcher`] is built; every request
/// made by that fetcher carries the same headers.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent string identifying the service.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub status_code: u16,
    pub body_text: String,
}

impl FetchResult {
    /// Returns the body if the response is usable as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::UpstreamStatus`] for non-2xx statuses and
    /// [`DistillError::EmptyBody`] for a 2xx response whose body is blank.
    pub fn into_html(self) -> Result<String> {
        if !(200..300).contains(&self.status_code) {
            return Err(DistillError::UpstreamStatus(self.status_code));
        }

        if self.body_text.trim().is_empty() {
            return Err(DistillError::EmptyBody);
        }

        Ok(self.body_text)
    }
}

/// Performs the outbound page request.
///
/// The underlying [`Client`] is built once and reused, so connection pooling
/// is whatever reqwest provides. No timeout is configured and redirects use
/// reqwest's default policy.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::Http`] if the HTTP client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// Returns the configuration this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Issues a single GET request and returns the raw response.
    ///
    /// Only transport failures are errors here; status handling is left to
    /// [`FetchResult::into_html`].
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult> {
        tracing::debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, ACCEPT_HTML)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body_text = response.text().await?;

        tracing::debug!(url = %url, status = status_code, bytes = body_text.len(), "fetched page");

        Ok(FetchResult { status_code, body_text })
    }

    /// Fetches the page and returns its HTML body.
    pub async fn fetch_html(&self, url: &Url) -> Result<String> {
        let result = self.fetch(url).await?;
        let status = result.status_code;

        result.into_html().inspect_err(|err| {
            tracing::warn!(url = %url, status, error = %err, "upstream response rejected");
        })
    }
}
