//! Claude API integration for admin copywriting.
//!
//! [`ClaudeClient`] talks to the Anthropic Messages API. Callers that only
//! need "prompt in, text out" depend on the [`TextGenerator`] trait so the
//! backend can be swapped in tests.

mod client;
mod error;
pub mod types;

use async_trait::async_trait;

pub use client::ClaudeClient;
pub use error::{ApiError, ApiErrorResponse, ClaudeError};

/// A service that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single user prompt.
    ///
    /// An empty string means the service answered with no text.
    async fn generate(&self, prompt: String) -> Result<String, ClaudeError>;
}
