//! Market data REST client implementation.
//!
//! The [`MarketDataClient`] provides a type-safe interface for the two
//! collaborators the refresher depends on: pool lookup by token, and OHLCV
//! candle series by pool.
//!
//! # Example
//!
//! ```rust,ignore
//! use tokencharts::api::MarketDataClient;
//! use tokencharts::api::types::OhlcvParams;
//! use tokencharts::shared::Timeframe;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketDataClient::new("https://api.geckoterminal.com/api/v2")?;
//!
//!     let pools = client.get_token_pools("solana", "So11111...", Some(1)).await?;
//!     println!("Found {} pools", pools.data.len());
//!
//!     let params = OhlcvParams::new(Timeframe::Hour).with_aggregate(4).with_limit(100);
//!     let ohlcv = client.get_pool_ohlcv("solana", "PoolAddr...", &params).await?;
//!     println!("Got {} candles", ohlcv.candles().len());
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::types::{OhlcvParams, OhlcvResponse, PoolsResponse};

/// Default request timeout in seconds.
///
/// Bounds every fetch so a hung collaborator surfaces as an error instead of
/// stalling a symbol's refresh forever.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retry configuration for the API client.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = disabled)
    pub max_retries: u32,
    /// Base delay before first retry (ms)
    pub base_delay_ms: u64,
    /// Maximum delay between retries (ms)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 100,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the given max retries.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Set the base delay in milliseconds.
    pub fn with_base_delay_ms(mut self, ms: u64) -> Self {
        self.base_delay_ms = ms;
        self
    }

    /// Set the maximum delay in milliseconds.
    pub fn with_max_delay_ms(mut self, ms: u64) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Calculate delay for a given attempt with exponential backoff and jitter.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp_delay = self.base_delay_ms.saturating_mul(1 << attempt.min(10));
        let capped_delay = exp_delay.min(self.max_delay_ms);
        // Add jitter: 75-100% of calculated delay
        let jitter_range = capped_delay / 4;
        let jitter = rand::random::<u64>() % (jitter_range + 1);
        Duration::from_millis(capped_delay - jitter_range + jitter)
    }
}

/// Builder for configuring [`MarketDataClient`].
#[derive(Debug, Clone)]
pub struct MarketDataClientBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
    retry_config: RetryConfig,
}

impl MarketDataClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Enable retries with exponential backoff.
    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<MarketDataClient> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str())
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = reqwest::header::HeaderValue::from_str(&value)
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        builder = builder.default_headers(headers);

        let http_client = builder.build()?;

        Ok(MarketDataClient {
            http_client,
            base_url: self.base_url,
            retry_config: self.retry_config,
        })
    }
}

/// Market data REST client.
///
/// Provides the pool lookup and OHLCV endpoints consumed by the refresher.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http_client: Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl MarketDataClient {
    /// Create a new client with the given base URL.
    ///
    /// Uses default settings (30s timeout, connection pooling, no retries).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        MarketDataClientBuilder::new(base_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> MarketDataClientBuilder {
        MarketDataClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Execute a GET request with optional retry logic.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let mut attempt = 0;

        loop {
            let result = self.http_client.get(url).send().await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.json::<T>().await.map_err(|e| {
                            ApiError::Deserialize(format!("Failed to deserialize response: {}", e))
                        });
                    }

                    let error = self.parse_error_response(response).await;

                    if attempt < self.retry_config.max_retries && Self::is_retryable_status(status) {
                        let delay = self.retry_config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max_retries = self.retry_config.max_retries,
                            delay_ms = delay.as_millis(),
                            status = %status,
                            "Retrying request after error"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(error);
                }
                Err(e) => {
                    let is_retryable = e.is_connect() || e.is_timeout() || e.is_request();

                    if attempt < self.retry_config.max_retries && is_retryable {
                        let delay = self.retry_config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max_retries = self.retry_config.max_retries,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Retrying request after network error"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(ApiError::Http(e));
                }
            }
        }
    }

    /// Parse an error response into an ApiError.
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                return Self::map_status_error(
                    status,
                    ErrorResponse::from_text(format!("HTTP {} (body unreadable: {})", status, e)),
                );
            }
        };

        let error_response = serde_json::from_str::<ErrorResponse>(&error_text)
            .unwrap_or_else(|_| ErrorResponse::from_text(error_text));

        Self::map_status_error(status, error_response)
    }

    /// Map HTTP status code to ApiError.
    fn map_status_error(status: StatusCode, response: ErrorResponse) -> ApiError {
        let message = response.get_message();
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(message),
            _ if status.is_server_error() => ApiError::ServerError(message),
            _ => ApiError::UnexpectedStatus(status.as_u16(), message),
        }
    }

    /// Check if a status code is retryable.
    fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
    }

    // =========================================================================
    // Pool lookup endpoint
    // =========================================================================

    /// List liquidity pools for a token.
    ///
    /// Returns pool records in upstream order; use
    /// [`best_pool`](crate::api::types::best_pool) to apply the
    /// highest-volume selection rule.
    pub async fn get_token_pools(
        &self,
        network: &str,
        token_id: &str,
        page: Option<u32>,
    ) -> ApiResult<PoolsResponse> {
        if token_id.is_empty() {
            return Err(ApiError::InvalidParameter("token_id cannot be empty".to_string()));
        }

        let mut url = format!(
            "{}/networks/{}/tokens/{}/pools",
            self.base_url,
            urlencoding::encode(network),
            urlencoding::encode(token_id)
        );
        if let Some(p) = page {
            url.push_str(&format!("?page={}", p));
        }
        self.get(&url).await
    }

    // =========================================================================
    // OHLCV endpoint
    // =========================================================================

    /// Get the OHLCV candle series for a pool.
    ///
    /// Candles are returned oldest first, as consumed by the analyzer.
    pub async fn get_pool_ohlcv(
        &self,
        network: &str,
        pool_address: &str,
        params: &OhlcvParams,
    ) -> ApiResult<OhlcvResponse> {
        if pool_address.is_empty() {
            return Err(ApiError::InvalidParameter("pool_address cannot be empty".to_string()));
        }

        let mut url = format!(
            "{}/networks/{}/pools/{}/ohlcv/{}",
            self.base_url,
            urlencoding::encode(network),
            urlencoding::encode(pool_address),
            params.timeframe
        );

        let mut sep = '?';
        if let Some(aggregate) = params.aggregate {
            url.push_str(&format!("{}aggregate={}", sep, aggregate));
            sep = '&';
        }
        if let Some(limit) = params.limit {
            url.push_str(&format!("{}limit={}", sep, limit));
            sep = '&';
        }
        if let Some(before) = params.before_timestamp {
            url.push_str(&format!("{}before_timestamp={}", sep, before));
        }

        self.get(&url).await
    }
}
