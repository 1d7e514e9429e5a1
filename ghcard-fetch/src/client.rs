//! GitHub REST client.
//!
//! Issues GET requests against a fixed API host and returns parsed JSON.
//! Every request carries the identifying `User-Agent` GitHub requires and
//! no credentials, so the unauthenticated rate limit applies.

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::HttpError;

/// Default API host.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("ghcard/", env!("CARGO_PKG_VERSION"));

/// Media type for the GitHub REST API.
const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Pinned REST API version.
const GITHUB_API_VERSION: &str = "2022-11-28";

// ============================================================================
// Client Settings
// ============================================================================

/// Settings used to build a [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientSettings {
    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// GitHub Client
// ============================================================================

/// HTTP client bound to one GitHub API host.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    inner: Client,
    base_url: String,
}

impl GitHubClient {
    /// Creates a client for `api.github.com` with default settings.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_settings(&ClientSettings::default())
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the client cannot be built.
    pub fn with_settings(settings: &ClientSettings) -> Result<Self, HttpError> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT_GITHUB_JSON));
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let inner = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self { inner, base_url })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an API path such as `/users/octocat`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the result does not parse.
    pub fn url_for(&self, path: &str) -> Result<Url, HttpError> {
        let joined = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// Fetches `path` and returns the body as untyped JSON.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Status`] for any non-2xx response
    /// - [`HttpError::Transport`] when no response arrived
    /// - [`HttpError::Parse`] when the body is not JSON
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, HttpError> {
        self.fetch(path).await
    }

    /// Fetches `path` and deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`GitHubClient::fetch_json`], with [`HttpError::Parse`] also
    /// covering bodies that are JSON but not shaped like `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.url_for(path)?;
        debug!(url = %url, "GET request");

        let response = self.inner.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            HttpError::from(e)
        })?;
        debug!(status = %response.status(), "Response received");

        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Passes 2xx responses through and turns anything else into [`HttpError::Status`].
async fn check_status(response: Response) -> Result<Response, HttpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "unexpected status".to_string());

    warn!(status = status.as_u16(), message = %message, "API error");
    Err(HttpError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Extracts `message` from a GitHub error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
