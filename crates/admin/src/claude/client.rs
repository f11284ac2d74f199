//! Claude API client for one-shot text generation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::TextGenerator;
use super::error::{ApiErrorResponse, ClaudeError};
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude API client.
///
/// Sends non-streaming requests to the Anthropic Messages API. Every request
/// is bounded by the timeout from [`ClaudeConfig`].
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns [`ClaudeError::InvalidApiKey`] if the key cannot be used as a
    /// header value, or [`ClaudeError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(config: &ClaudeConfig) -> Result<Self, ClaudeError> {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key).map_err(|_| ClaudeError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a chat request and get a complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, times out, or returns an
    /// error response.
    #[instrument(skip(self, messages), fields(model = %self.inner.model))]
    pub async fn chat(&self, messages: Vec<Message>) -> Result<ChatResponse, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Claude response received"
        );
        Ok(response)
    }

    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClaudeError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ClaudeError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ClaudeError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ClaudeError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    ClaudeError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    }
                } else {
                    ClaudeError::Api {
                        error_type: format!("http_{}", status.as_u16()),
                        message: body,
                    }
                }
            }
            Err(e) => ClaudeError::Http(e),
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, prompt: String) -> Result<String, ClaudeError> {
        let response = self.chat(vec![Message::user(prompt)]).await?;
        Ok(response.text())
    }
}
