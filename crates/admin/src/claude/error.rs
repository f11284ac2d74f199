//! Error types for the Claude API client.

use thiserror::Error;

/// Errors that can occur when interacting with the Claude API.
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// HTTP request failed (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key cannot be sent as a header value.
    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,

    /// Claude API returned an error.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// API error response from Claude.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}
