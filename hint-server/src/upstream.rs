use std::{env, time::Duration};

use serde_json::{json, Value};

use crate::config::ServerConfig;

const STRATEGY_PROMPT: &str = "Analyze and return JSON strategy.";
// Inline payloads are always declared as png; the endpoint accepts jpeg
// bytes under that label too.
const INLINE_MIME: &str = "image/png";

/// Thin adapter around the generateContent endpoint. Holds no credential;
/// the key is read from the environment at request time and must never be
/// logged or echoed.
#[derive(Clone)]
pub(crate) struct GeminiClient {
    api_base: String,
    model: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl GeminiClient {
    pub(crate) fn new(config: &ServerConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.upstream_timeout_secs),
            http: reqwest::Client::new(),
        }
    }

    fn api_key() -> Option<String> {
        non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("API_KEY"))
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    pub(crate) fn build_payload(clean_b64: &str) -> Value {
        json!({
            "contents": [{
                "parts": [
                    { "text": STRATEGY_PROMPT },
                    { "inlineData": { "mimeType": INLINE_MIME, "data": clean_b64 } },
                ],
            }],
        })
    }

    /// Forwards the cleaned base64 image and relays the model's JSON answer.
    /// Returns `(error_message, error_code)` on failure.
    pub(crate) async fn strategic_hint(
        &self,
        clean_b64: &str,
    ) -> Result<Value, (String, &'static str)> {
        let Some(api_key) = Self::api_key() else {
            return Err((
                "upstream credential is not configured".to_string(),
                "missing_api_key",
            ));
        };

        let payload = Self::build_payload(clean_b64);
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key.as_str())])
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                // without_url: the request URL carries the key.
                (
                    format!("upstream request failed: {}", err.without_url()),
                    "upstream_request_failed",
                )
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|err| {
            (
                format!("upstream response read failed: {}", err.without_url()),
                "upstream_request_failed",
            )
        })?;
        if !status.is_success() {
            return Err((
                format!("upstream returned status {status}"),
                "upstream_request_failed",
            ));
        }

        parse_strategy(&body)
    }
}

/// Concatenates the candidate text parts and parses them as JSON. A model
/// answer that is not valid JSON fails the whole request; the defensive
/// fallback lives in the game-side client, not here.
pub(crate) fn parse_strategy(body: &Value) -> Result<Value, (String, &'static str)> {
    let text = model_text(body).ok_or_else(|| {
        (
            "upstream response contained no text parts".to_string(),
            "upstream_parse_error",
        )
    })?;

    serde_json::from_str::<Value>(text.trim()).map_err(|err| {
        (
            format!("model output is not valid JSON: {err}"),
            "upstream_parse_error",
        )
    })
}

fn model_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(Value::as_str) {
            text.push_str(chunk);
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
