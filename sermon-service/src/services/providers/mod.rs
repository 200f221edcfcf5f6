//! Chat completion provider abstraction.
//!
//! The handler only talks to `CompletionProvider`, so the OpenRouter client
//! can be swapped for the scripted mock in tests.

pub mod mock;
pub mod openrouter;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Provider misconfigured: {0}")]
    InvalidConfig(String),

    /// Non-success status. `body` is the raw upstream error text, meant for
    /// logs only.
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("{0}")]
    NetworkError(String),

    #[error("Failed to parse response: {0}")]
    InvalidBody(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send one chat completion request, authenticated with `api_key`.
    async fn complete(
        &self,
        api_key: &Secret<String>,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError>;
}
