use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::Instant;

use shooter_core::hint::{fallback_hint, HintRequest, HintResult};

pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Seam between the orchestrator and whatever produces hints. An
/// implementation must always resolve; the defensive fallback lives behind
/// this boundary, never above it.
pub trait HintSource: Send + Sync + 'static {
    fn request_hint(&self, request: HintRequest) -> impl Future<Output = HintResult> + Send;
}

/// HTTP client for the strategic-hint backend, bounded by a 5 s deadline.
/// Timeouts, transport failures, and undecodable bodies all collapse into
/// the deterministic fallback.
pub struct HintClient {
    endpoint: String,
    deadline: Duration,
    http: reqwest::Client,
}

impl HintClient {
    pub fn new(backend: &str) -> Self {
        Self {
            endpoint: format!("{}/api/strategic-hint", backend.trim_end_matches('/')),
            deadline: CLIENT_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn post_hint(&self, request: &HintRequest) -> Result<HintResult> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("hint request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("hint backend returned status {status}");
        }

        response
            .json::<HintResult>()
            .await
            .context("hint response decode failed")
    }
}

impl HintSource for HintClient {
    fn request_hint(&self, request: HintRequest) -> impl Future<Output = HintResult> + Send {
        async move {
            let started = Instant::now();
            match tokio::time::timeout(self.deadline, self.post_hint(&request)).await {
                Ok(Ok(mut result)) => {
                    if result.debug.latency == 0 {
                        result.debug.latency =
                            started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64;
                    }
                    result
                }
                Ok(Err(err)) => {
                    tracing::warn!("hint request failed, engaging fallback: {err:#}");
                    fallback_hint()
                }
                Err(_) => {
                    tracing::warn!(
                        deadline_ms = self.deadline.as_millis() as u64,
                        "hint request deadline exceeded, engaging fallback"
                    );
                    fallback_hint()
                }
            }
        }
    }
}
