//! API error types for the market data client.

use thiserror::Error;

/// API-specific error type for the market data client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request parameters (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limit exceeded (429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Server-side error (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// JSON deserialization error
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unexpected HTTP status code
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response format from the API.
///
/// The upstream wraps errors either as a flat `{status, message}` object or a
/// JSON:API `errors` array; both are accepted and reduced to one message.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorResponse {
    /// Error status (usually "error")
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable error message
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    /// JSON:API style error list
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// One entry of a JSON:API `errors` array.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorDetail {
    /// Status code as a string
    #[serde(default)]
    pub status: Option<String>,
    /// Short error title
    #[serde(default)]
    pub title: Option<String>,
}

impl ErrorResponse {
    /// Wrap a raw body that did not parse as a structured error.
    pub fn from_text(text: String) -> Self {
        Self {
            status: None,
            message: Some(text),
            errors: Vec::new(),
        }
    }

    /// Get the error message, preferring `message` over the error list.
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.errors.first().and_then(|e| e.title.clone()))
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
