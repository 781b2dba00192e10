use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound body for `/api/strategic-hint`. The auxiliary context fields are
/// accepted but do not alter the fixed upstream prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StrategicHintRequest {
    #[serde(default)]
    pub(crate) image_base64: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) valid_targets: Option<Value>,
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) danger_row: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
    pub(crate) model: String,
    pub(crate) upstream_timeout_secs: u64,
    pub(crate) max_image_bytes: usize,
}
