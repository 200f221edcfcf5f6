//! OpenRouter chat completion client.

use super::{CompletionProvider, ProviderError};
use crate::config::OpenRouterConfig;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use service_core::observability::TracedClientExt;

/// `X-Title` sent with every request, Latin-1 encoded ("Gerador de Sermões").
const APP_TITLE: &[u8] = b"Gerador de Serm\xf5es";

const HTTP_REFERER: HeaderName = HeaderName::from_static("http-referer");
const X_TITLE: HeaderName = HeaderName::from_static("x-title");

pub struct OpenRouterProvider {
    client: Client,
    completions_url: String,
    identification: HeaderMap,
}

impl OpenRouterProvider {
    pub fn new(config: &OpenRouterConfig) -> Result<Self, ProviderError> {
        let referer = HeaderValue::from_str(&config.referer).map_err(|e| {
            ProviderError::InvalidConfig(format!("Invalid referer '{}': {}", config.referer, e))
        })?;

        let title = HeaderValue::from_bytes(APP_TITLE)
            .map_err(|e| ProviderError::InvalidConfig(format!("Invalid title header: {}", e)))?;

        let mut identification = HeaderMap::new();
        identification.insert(HTTP_REFERER, referer);
        identification.insert(X_TITLE, title);

        Ok(Self {
            client: Client::new(),
            completions_url: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            identification,
        })
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(
        &self,
        api_key: &Secret<String>,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        tracing::debug!(
            model = %request.model,
            prompt_len = request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .traced_post(&self.completions_url)
            .bearer_auth(api_key.expose_secret())
            .headers(self.identification.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        status = status.as_u16(),
                        error = %e,
                        "Failed to read OpenRouter error body"
                    );
                    String::new()
                }
            };
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ProviderError::InvalidBody(e.to_string()))
    }
}
