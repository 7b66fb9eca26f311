//! HTTP client for the RLMK server REST API.
//!
//! Handles the bearer token, timeouts, exponential backoff retry, and
//! mapping of error responses onto `RlmkError`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use rlmk_core::config::ClientConfig;
use rlmk_core::constants::API_PREFIX;
use rlmk_core::error::{RlmkError, RlmkResult};
use rlmk_models::api::ErrorBody;

/// Retry configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Base delay between retries (doubles each attempt).
    pub base_delay: Duration,
    /// Maximum delay cap.
    pub max_delay: Duration,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// No retries at all.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// HTTP client for the RLMK server.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL for the API (e.g. "http://localhost:3000/api").
    api_root: String,
    /// Bearer token sent with every request once logged in.
    token: Arc<RwLock<Option<String>>>,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl ApiClient {
    /// Create a new client from the client configuration.
    pub fn new(config: &ClientConfig) -> RlmkResult<Self> {
        let timeout = Duration::from_millis(config.api_timeout_ms);
        let inner = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| RlmkError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            api_root: api_root(&config.api_url),
            token: Arc::new(RwLock::new(None)),
            timeout,
            retry_config: RetryConfig::default(),
        })
    }

    /// Set custom retry configuration.
    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Get the API root URL.
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Set or clear the bearer token.
    pub async fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().await;
        *guard = token;
        debug!("bearer token {}", if guard.is_some() { "set" } else { "cleared" });
    }

    /// Whether a bearer token is currently set.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn build_request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> RequestBuilder {
        let mut builder = self.inner.request(method, url).timeout(self.timeout);
        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(b) = body {
            builder = builder.json(b);
        }
        builder
    }

    /// Execute a request with exponential backoff retry.
    async fn request_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> RlmkResult<Response> {
        let url = format!("{}{path}", self.api_root);
        debug!("{} {}", method, path);

        let mut last_error: Option<RlmkError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            if attempt > 0 {
                let delay = self.calculate_retry_delay(attempt - 1);
                warn!(
                    "retrying {} {} (attempt {}/{}) after {:.1}s",
                    method,
                    path,
                    attempt + 1,
                    self.retry_config.max_retries + 1,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }

            let builder = self.build_request(method.clone(), &url, body).await;

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();
                    if self
                        .retry_config
                        .retryable_statuses
                        .contains(&status.as_u16())
                        && attempt < self.retry_config.max_retries
                    {
                        warn!("retryable status {} from {}", status.as_u16(), path);
                        last_error = Some(RlmkError::ServerError {
                            status: status.as_u16(),
                            message: format!("retryable status {status}"),
                        });
                        continue;
                    }

                    return Self::check_status(response).await;
                }
                Err(e) => {
                    let is_retryable = e.is_timeout() || e.is_connect();
                    let err = Self::classify_error(e);

                    if is_retryable && attempt < self.retry_config.max_retries {
                        warn!("retryable error on {}: {}", path, err);
                        last_error = Some(err);
                        continue;
                    }

                    return Err(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| RlmkError::Http("max retries exceeded".into())))
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.retry_config.base_delay.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64 << attempt.min(32));
        let max_ms = self.retry_config.max_delay.as_millis() as u64;
        Duration::from_millis(delay_ms.min(max_ms))
    }

    // --- Typed HTTP methods ---

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RlmkResult<T> {
        let resp = self.request_with_retry(Method::GET, path, None).await?;
        Self::parse_response(resp).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> RlmkResult<T> {
        let body = serde_json::to_value(body)?;
        let resp = self.request_with_retry(Method::POST, path, Some(&body)).await?;
        Self::parse_response(resp).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> RlmkResult<T> {
        let body = serde_json::to_value(body)?;
        let resp = self.request_with_retry(Method::PUT, path, Some(&body)).await?;
        Self::parse_response(resp).await
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> RlmkResult<T> {
        let resp = self.request_with_retry(Method::DELETE, path, None).await?;
        Self::parse_response(resp).await
    }

    /// Deserialize a successful response body.
    async fn parse_response<T: DeserializeOwned>(response: Response) -> RlmkResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| RlmkError::Serialization(format!("failed to parse response: {e}")))
    }

    /// Convert non-success statuses into errors carrying the server message.
    async fn check_status(response: Response) -> RlmkResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text, status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RlmkError::AuthFailed(message));
        }
        Err(RlmkError::ServerError {
            status: status.as_u16(),
            message,
        })
    }

    /// Classify a reqwest error into an RlmkError variant.
    fn classify_error(e: reqwest::Error) -> RlmkError {
        if e.is_timeout() {
            RlmkError::Timeout(e.to_string())
        } else if e.is_connect() {
            RlmkError::Http(format!("connection failed: {e}"))
        } else {
            RlmkError::Http(e.to_string())
        }
    }
}

/// Join the server URL and the API prefix, tolerating a trailing slash or an
/// address that already ends in the prefix.
fn api_root(api_url: &str) -> String {
    let base = api_url.trim().trim_end_matches('/');
    if base.ends_with(API_PREFIX) {
        base.to_string()
    } else {
        format!("{base}{API_PREFIX}")
    }
}

/// Pull `error` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str, status: StatusCode) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Build a query string from optional parameters, skipping absent ones.
pub(crate) fn query_string(params: &[(&str, Option<String>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| format!("{k}={v}")))
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
