//! Request-level failures and their JSON rendering.
//!
//! Every variant is answered with a body carrying an `erro` message and, for
//! upstream and unclassified failures, a `detalhes` field.

use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

/// Upstream status that identifies a rejected credential.
const UPSTREAM_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Error)]
pub enum SermonError {
    #[error("Método não permitido. Use POST.")]
    MethodNotAllowed,

    #[error("Parâmetros obrigatórios: tema e versiculo")]
    MissingParameters,

    #[error("Chave da API OpenRouter não configurada")]
    ApiKeyNotConfigured,

    #[error("Erro ao comunicar com a API de IA")]
    Upstream { status: u16 },

    #[error("Resposta inválida da API de IA")]
    InvalidUpstreamResponse,

    #[error("Erro interno do servidor")]
    Internal(String),
}

impl SermonError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SermonError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SermonError::MissingParameters => StatusCode::BAD_REQUEST,
            SermonError::ApiKeyNotConfigured
            | SermonError::Upstream { .. }
            | SermonError::InvalidUpstreamResponse
            | SermonError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Cause-specific detail shown to the caller. Never contains upstream
    /// bodies or credentials.
    pub fn details(&self) -> Option<String> {
        match self {
            SermonError::Upstream { status } if *status == UPSTREAM_UNAUTHORIZED => {
                Some("Chave da API inválida".to_string())
            }
            SermonError::Upstream { .. } => Some("Erro interno da API".to_string()),
            SermonError::Internal(message) => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<ProviderError> for SermonError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError { status, .. } => SermonError::Upstream { status },
            other => SermonError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for SermonError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            erro: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            detalhes: Option<String>,
        }

        if let SermonError::Internal(message) = &self {
            tracing::error!(error = %message, "Erro interno");
        }

        (
            self.status_code(),
            Json(ErrorResponse {
                erro: self.to_string(),
                detalhes: self.details(),
            }),
        )
            .into_response()
    }
}

/// Turns a panic caught by `CatchPanicLayer` into the same 500 body any other
/// unclassified failure gets.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    SermonError::Internal(message).into_response()
}
