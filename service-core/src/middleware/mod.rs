//! Axum middleware shared by every HTTP-facing service.

pub mod security_headers;
pub mod tracing;
