//! Shared setup for sermon-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use secrecy::Secret;
use sermon_service::config::{OpenRouterConfig, SermonConfig};
use sermon_service::services::providers::CompletionProvider;
use sermon_service::{build_router, AppState};
use service_core::config::Config;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "sk-or-test-key";

pub fn test_config(api_key: Option<&str>, base_url: &str) -> SermonConfig {
    SermonConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        openrouter: OpenRouterConfig {
            api_key: api_key.map(|key| Secret::new(key.to_string())),
            base_url: base_url.to_string(),
            referer: "https://sermao-gerador.vercel.app".to_string(),
        },
    }
}

pub fn test_router(provider: Arc<dyn CompletionProvider>, api_key: Option<&str>) -> Router {
    build_router(AppState {
        config: test_config(api_key, "http://127.0.0.1:9"),
        completion_provider: provider,
    })
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: axum::body::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,OPTIONS,PATCH,DELETE,POST,PUT"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version"
    );
}
