//! HTTP client for the cluster's REST API
//!
//! Every call the crate makes is a GET returning JSON. Failed calls are
//! classified into [`Error`] variants and retried when [`Error::is_retryable`]
//! says so. Error bodies in the cluster's `{"error": {"type", "reason"}}`
//! shape are condensed into the message of [`Error::HttpStatus`].

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("elastic-reverse/", env!("CARGO_PKG_VERSION"));

/// Fallback wait when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Connection settings for one cluster
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Cluster root, e.g. `http://localhost:9200`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay between retries
    pub backoff: Backoff,
    /// Client-side throttle, `None` to send requests as fast as possible
    pub rate_limit: Option<RateLimiterConfig>,
}

impl HttpClientConfig {
    /// Settings for the cluster at `base_url` with default limits
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: Backoff::default(),
            rate_limit: Some(RateLimiterConfig::default()),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimiterConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

/// Retry delay schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub kind: BackoffType,
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            kind: BackoffType::Exponential,
            initial: Duration::from_millis(100),
            max: Duration::from_secs(60),
        }
    }
}

impl Backoff {
    pub fn new(kind: BackoffType, initial: Duration, max: Duration) -> Self {
        Self { kind, initial, max }
    }

    /// Delay before retry number `attempt + 1`, capped at `max`
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.kind {
            BackoffType::Constant => self.initial,
            BackoffType::Linear => self.initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => self.initial.saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(self.max)
    }
}

/// Retrying, rate-limited JSON client bound to one cluster
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client that authenticates every request with `auth`
    pub fn new(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(auth),
            rate_limiter,
        })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET `path` (relative to the cluster root) and parse the JSON body
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.config.base_url, path.trim_start_matches('/'));
        let mut attempt = 0;

        loop {
            match self.send(&url, query).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let delay = match &err {
                        Error::RateLimited {
                            retry_after_seconds,
                        } => Duration::from_secs(*retry_after_seconds),
                        _ => self.config.backoff.delay(attempt),
                    };
                    warn!(
                        "GET {} failed ({}), attempt {}/{}, retrying in {:?}",
                        url,
                        err,
                        attempt + 1,
                        self.config.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.wait().await;
        }

        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self
            .authenticator
            .apply(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited {
                retry_after_seconds: retry_after(&response),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), cluster_reason(&body)));
        }

        debug!("GET {} -> {}", url, status.as_u16());
        response.json().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("authenticator", &self.authenticator)
            .field("rate_limited", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Current clusters nest a typed cause, 1.x and 2.x send a plain string
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Cause {
        #[serde(rename = "type")]
        kind: String,
        reason: Option<String>,
    },
    Message(String),
}

/// Condense an error response into `type: reason`, or the raw body when it
/// is not a cluster error document
pub(crate) fn cluster_reason(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorDetail::Cause {
                kind,
                reason: Some(reason),
            },
        }) => format!("{kind}: {reason}"),
        Ok(ErrorBody {
            error: ErrorDetail::Cause { kind, reason: None },
        }) => kind,
        Ok(ErrorBody {
            error: ErrorDetail::Message(message),
        }) => message,
        Err(_) => body.trim().to_string(),
    }
}

fn retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
