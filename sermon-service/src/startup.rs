//! Application startup and lifecycle management.

use crate::config::SermonConfig;
use crate::error::panic_response;
use crate::handlers::{generate_sermon, health_check};
use crate::middleware::{preflight_middleware, with_cors_headers};
use crate::services::providers::openrouter::OpenRouterProvider;
use crate::services::providers::CompletionProvider;
use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware, tracing::request_id_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: SermonConfig,
    pub completion_provider: Arc<dyn CompletionProvider>,
}

/// Build the HTTP router.
///
/// Layer order, outermost first: CORS headers, preflight short-circuit,
/// panic catcher, request id, tracing span, security headers.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/generate", any(generate_sermon))
        .route("/health", get(health_check))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .with_state(state)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn(preflight_middleware));

    with_cors_headers(router)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: SermonConfig) -> Result<Self, AppError> {
        let provider = OpenRouterProvider::new(&config.openrouter)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(
            endpoint = %provider.completions_url(),
            api_key_configured = config.openrouter.api_key.is_some(),
            "Initialized OpenRouter provider"
        );
        if config.openrouter.api_key.is_none() {
            tracing::warn!("OPENROUTER_API_KEY is not set; generation requests will fail");
        }

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: SermonConfig,
        completion_provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = config.common.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Sermon service: HTTP on port {}", port);

        let state = AppState {
            config,
            completion_provider,
        };

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
