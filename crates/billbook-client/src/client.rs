//! # Client Handle
//!
//! [`BillbookClient`] owns the HTTP connection pool, the backend base URL
//! and the owner e-mail every request is scoped to.
//!
//! ## Request Path
//! ```text
//! repository method
//!      │  endpoint(&["api", "bills", id])   ← segments are percent-encoded
//!      ▼
//! execute(request)
//!      │  debug!(method, path)
//!      ├── 2xx ──────────────► Response
//!      └── other ──► body { message } ──► ClientError::from_status
//! ```

use std::time::Duration;

use billbook_core::validation::validate_email;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::repository::{BillRepository, DashboardRepository, PartyRepository, PaymentRepository};
use crate::wire::MessageBody;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Settings needed to build a [`BillbookClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `https://billing.example.com`.
    pub base_url: String,

    /// Identity every request is scoped to.
    pub owner_email: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Sent as `Authorization: Bearer <token>` when present.
    pub api_token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, owner_email: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            owner_email: owner_email.into(),
            timeout: DEFAULT_TIMEOUT,
            api_token: None,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

// =============================================================================
// Client
// =============================================================================

/// Handle to the backend. Cheap to clone; clones share the connection pool.
///
/// ## Usage
/// ```rust,ignore
/// let client = BillbookClient::new(ClientConfig::new(url, "owner@example.com"))?;
/// let parties = client.parties().list().await?;
/// let week = client.bills().week(range).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BillbookClient {
    http: reqwest::Client,
    base_url: Url,
    owner_email: String,
}

impl BillbookClient {
    /// Builds a client.
    ///
    /// ## Errors
    /// - `Validation` when the owner e-mail is malformed
    /// - `Config` when the URL is not http(s) or the token is not a valid
    ///   header value
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        validate_email(config.owner_email.trim())?;

        let base_url = Url::parse(config.base_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL must be http(s), got {base_url}"
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| ClientError::Config(format!("invalid API token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(BillbookClient {
            http,
            base_url,
            owner_email: config.owner_email.trim().to_string(),
        })
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Repository access
    // -------------------------------------------------------------------------

    pub fn parties(&self) -> PartyRepository {
        PartyRepository::new(self.clone())
    }

    pub fn bills(&self) -> BillRepository {
        BillRepository::new(self.clone())
    }

    pub fn dashboard(&self) -> DashboardRepository {
        DashboardRepository::new(self.clone())
    }

    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Plumbing shared by repositories
    // -------------------------------------------------------------------------

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base URL plus path segments. Each segment is percent-encoded, so names
    /// and ids cannot escape their position in the path.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("cannot extend base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and turns any non-success status into an error
    /// carrying the backend's `message`.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let request = builder.build()?;
        debug!(method = %request.method(), path = request.url().path(), "backend request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(MessageBody::text)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Server error".to_string());

        warn!(status = status.as_u16(), %message, "backend rejected request");
        Err(ClientError::from_status(status.as_u16(), message))
    }

    /// Sends a request and decodes the JSON body.
    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ClientResult<T> {
        let response = self.execute(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }

    /// Sends a request and returns the body's `message`, if any.
    ///
    /// Mutations do not always answer with JSON, so a missing or unreadable
    /// body is not an error.
    pub(crate) async fn execute_message(&self, builder: RequestBuilder) -> ClientResult<Option<String>> {
        let response = self.execute(builder).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(MessageBody::text))
    }
}
