//! HTTP client with rate limiting for vier.be and vijf.be
//!
//! This module provides the `PageFetcher` seam used by the extractors and a
//! rate-limited reqwest implementation of it that keeps session cookies and
//! retries transient GET failures with exponential backoff.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{Result, VierError};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Flemish content
const DEFAULT_ACCEPT_LANGUAGE: &str = "nl-BE,nl;q=0.9,en;q=0.8";

/// Content type of the login form submission
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Source of page content for the extractors.
///
/// `id` is the video or program the request is made for and is only used
/// for logging.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET a page and return its body as text
    async fn fetch_page(&self, url: &str, id: &str) -> Result<String>;

    /// POST form fields (`application/x-www-form-urlencoded`) and return the response body
    async fn post_form(&self, url: &str, id: &str, fields: &[(&str, &str)]) -> Result<String>;
}

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use vier_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Wait until the minimum interval since the previous request has passed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Check that the settings can drive a client.
    ///
    /// # Errors
    /// `VierError::InvalidConfig` if `requests_per_second` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !self.requests_per_second.is_finite() || self.requests_per_second <= 0.0 {
            return Err(VierError::InvalidConfig(format!(
                "requests_per_second must be a positive number, got {}",
                self.requests_per_second
            )));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for vier.be and vijf.be with rate limiting and retry logic
///
/// This client automatically:
/// - Limits request rate to avoid server overload
/// - Keeps cookies, so a successful login carries over to later requests
/// - Retries GETs on transient errors (429, 5xx) with exponential backoff
pub struct VierClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl VierClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch with retry on 429 and 5xx responses
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.rate_limiter.acquire().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(VierError::NotFound(url.to_string()));
            }

            let retryable =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if retryable && attempt < MAX_RETRIES {
                let delay = self.calculate_backoff_delay(attempt);
                debug!(url, %status, attempt, ?delay, "Retrying request");
                sleep(delay).await;
                return self.fetch_with_retry(url, attempt + 1).await;
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(VierError::RateLimited);
            }

            Err(status_error(response))
        })
    }

    /// Calculate exponential backoff delay for retry
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // 1s, 2s, 4s, ...
        let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
        Duration::from_millis(delay_ms)
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl PageFetcher for VierClient {
    async fn fetch_page(&self, url: &str, id: &str) -> Result<String> {
        debug!(url, id, "Downloading webpage");
        self.fetch_with_retry(url, 0).await
    }

    async fn post_form(&self, url: &str, id: &str, fields: &[(&str, &str)]) -> Result<String> {
        debug!(url, id, "Submitting form");
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(encode_form(fields))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(status_error(response))
        }
    }
}

/// Turn a non-success response into an error
fn status_error(response: reqwest::Response) -> VierError {
    let status = response.status();
    match response.error_for_status() {
        Err(e) => VierError::HttpError(e),
        Ok(_) => VierError::UnexpectedStatus(status.as_u16()),
    }
}

/// Percent-encode form fields as `application/x-www-form-urlencoded`
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
