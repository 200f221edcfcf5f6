//! `POST /api/generate`: topic + scripture reference in, sermon out.
//!
//! CORS headers and the `OPTIONS` short-circuit are applied by router layers
//! before this handler runs; see `crate::middleware::cors`.

use crate::error::SermonError;
use crate::models::{ChatCompletionRequest, SermonRequest, SermonResponse};
use crate::services::build_sermon_prompt;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::Method,
    Json,
};

/// Largest request body buffered before it is treated as an internal error.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn generate_sermon(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<SermonResponse>, SermonError> {
    // Method gate runs before the body is buffered.
    if request.method() != Method::POST {
        return Err(SermonError::MethodNotAllowed);
    }

    let body = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| SermonError::Internal(format!("Failed to read request body: {}", e)))?;

    let (tema, versiculo) = SermonRequest::from_body(&body)?.into_fields()?;

    let api_key = state
        .config
        .openrouter
        .api_key
        .as_ref()
        .ok_or(SermonError::ApiKeyNotConfigured)?;

    let request = ChatCompletionRequest::for_prompt(build_sermon_prompt(&tema, &versiculo));

    let completion = state
        .completion_provider
        .complete(api_key, &request)
        .await
        .map_err(|e| {
            if let ProviderError::ApiError { status, body } = &e {
                tracing::error!(status, body = %body, "Erro da API OpenRouter");
            }
            SermonError::from(e)
        })?;

    let message = completion
        .first_message()
        .ok_or(SermonError::InvalidUpstreamResponse)?;

    tracing::info!(
        tema = %tema,
        versiculo = %versiculo,
        chars = message
            .content
            .as_ref()
            .and_then(|c| c.as_str())
            .map_or(0, |c| c.chars().count()),
        "Sermon generated"
    );

    Ok(Json(SermonResponse::new(message.content, tema, versiculo)))
}
