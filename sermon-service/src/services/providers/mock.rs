//! Scripted provider for tests.

use super::{CompletionProvider, ProviderError};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Returns the same canned outcome on every call and records what it was
/// asked.
pub struct MockCompletionProvider {
    reply: Result<ChatCompletionResponse, ProviderError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
    last_api_key: Mutex<Option<String>>,
}

impl MockCompletionProvider {
    pub fn new(reply: Result<ChatCompletionResponse, ProviderError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_api_key: Mutex::new(None),
        }
    }

    /// Successful upstream body, given as JSON.
    pub fn with_body(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(Self::new(Ok(serde_json::from_value(body)?)))
    }

    /// Upstream answered with a non-success `status`.
    pub fn with_status(status: u16, body: &str) -> Self {
        Self::new(Err(ProviderError::ApiError {
            status,
            body: body.to_string(),
        }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().ok()?.clone()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().ok()?.clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        api_key: &Secret<String>,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        if let Ok(mut last) = self.last_api_key.lock() {
            *last = Some(api_key.expose_secret().clone());
        }

        self.reply.clone()
    }
}
