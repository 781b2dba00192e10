use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::capture::CapturedFrame;
use crate::sim::WorldSnapshot;

pub const FALLBACK_MESSAGE: &str = "AI Timeout — Playing safe.";
pub const FALLBACK_RATIONALE: &str = "Fallback strategy engaged.";
pub const FALLBACK_ERROR: &str = "Timeout";

/// One capture cycle's payload for the strategic-hint backend. Built once
/// per trigger and consumed exactly once.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub image_base64: String,
    #[serde(default)]
    pub valid_targets: Vec<TargetSummary>,
    #[serde(default)]
    pub danger_row: u32,
}

impl HintRequest {
    pub fn new(frame: &CapturedFrame, snapshot: &WorldSnapshot) -> Self {
        Self {
            image_base64: frame.to_data_uri(),
            valid_targets: snapshot.target_summaries(),
            danger_row: snapshot.danger_row(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSummary {
    pub color: String,
    pub count: u32,
    pub points: u32,
}

/// What the player sees for one display cycle. The backend's JSON is
/// unconstrained, so every debug field tolerates absence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HintResult {
    pub hint: StrategicHint,
    #[serde(default)]
    pub debug: HintDebug,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategicHint {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintDebug {
    #[serde(default)]
    pub latency: u64,
    #[serde(default)]
    pub prompt_context: String,
    #[serde(default)]
    pub raw_response: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The deterministic result substituted whenever the real path times out
/// or errors. Only the timestamp varies.
pub fn fallback_hint() -> HintResult {
    HintResult {
        hint: StrategicHint {
            message: FALLBACK_MESSAGE.to_string(),
            rationale: Some(FALLBACK_RATIONALE.to_string()),
        },
        debug: HintDebug {
            latency: 0,
            prompt_context: String::new(),
            raw_response: String::new(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            error: Some(FALLBACK_ERROR.to_string()),
        },
    }
}
