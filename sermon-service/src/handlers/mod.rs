//! HTTP handlers for the sermon service.

pub mod generate;
pub mod health;

pub use generate::generate_sermon;
pub use health::health_check;
