use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Chat completion endpoint used when `OPENROUTER_BASE_URL` is not set.
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Referer sent to OpenRouter when `DEPLOYMENT_URL` is not set.
pub const DEFAULT_DEPLOYMENT_URL: &str = "https://sermao-gerador.vercel.app";

#[derive(Debug, Clone)]
pub struct SermonConfig {
    pub common: core_config::Config,
    pub openrouter: OpenRouterConfig,
}

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// `None` is not a startup failure: every generation request answers 500
    /// until the key is provided.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    /// Value of the `HTTP-Referer` identification header.
    pub referer: String,
}

impl SermonConfig {
    /// Every OpenRouter setting is optional. Unset or empty values fall back
    /// to their defaults, or to `None` for the key.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(SermonConfig {
            common: common_config,
            openrouter: OpenRouterConfig {
                api_key: optional_env("OPENROUTER_API_KEY").map(Secret::new),
                base_url: env_or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
                referer: env_or("DEPLOYMENT_URL", DEFAULT_DEPLOYMENT_URL),
            },
        })
    }
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
