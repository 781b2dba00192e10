use std::env;

use crate::upstream::GeminiClient;

pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";
pub(crate) const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;
pub(crate) const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_GEMINI_API_BASE: &str =
    "https://generativelanguage.googleapis.com/v1beta";
pub(crate) const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Clone, Debug)]
pub(crate) struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) max_image_bytes: usize,
    pub(crate) json_limit_bytes: usize,
    pub(crate) upstream_timeout_secs: u64,
    pub(crate) api_base: String,
    pub(crate) model: String,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        let max_image_bytes = read_env_usize("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES);
        Self {
            bind_addr: env::var("API_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            max_image_bytes,
            // Data URIs inflate ~4/3 over the raw bytes; leave headroom.
            json_limit_bytes: read_env_usize("JSON_LIMIT_BYTES", max_image_bytes.saturating_mul(4)),
            upstream_timeout_secs: read_env_u64(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            ),
            api_base: env::var("GEMINI_API_BASE")
                .ok()
                .map(|value| value.trim().trim_end_matches('/').to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            model: env::var("GEMINI_MODEL")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) upstream: GeminiClient,
    pub(crate) config: ServerConfig,
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
