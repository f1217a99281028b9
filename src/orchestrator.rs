use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::degrade::synthesize;
use crate::metrics::{LOADING_RETRIES, MOCK_RESPONSES, UPSTREAM_ATTEMPTS};
use crate::models::ResponseEnvelope;
use crate::normalize::normalize;
use crate::upstream::{AttemptOutcome, FailureKind, UpstreamClient, UpstreamFailure};

// tries candidates in order, mock reply when none answers
pub struct Orchestrator {
    client: Arc<dyn UpstreamClient>,
    models: Vec<String>,
    retry_backoff: Duration,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn UpstreamClient>, models: Vec<String>, retry_backoff: Duration) -> Self {
        Self {
            client,
            models,
            retry_backoff,
        }
    }

    pub async fn generate(&self, prompt: &str) -> ResponseEnvelope {
        let mut last_error: Option<UpstreamFailure> = None;

        for model in &self.models {
            match self.attempt(model, prompt).await {
                AttemptOutcome::Success(payload) => {
                    let result = normalize(&payload);
                    if result.generated_text.trim().is_empty() {
                        warn!(model = %model, "model returned empty text, trying next");
                        last_error = Some(UpstreamFailure::new(
                            FailureKind::HttpError,
                            None,
                            "empty generated text",
                        ));
                        continue;
                    }
                    info!(model = %model, "upstream generation succeeded");
                    return ResponseEnvelope::upstream(model, result);
                }
                AttemptOutcome::Failure(failure) => {
                    warn!(model = %model, kind = ?failure.kind, error = %failure.message, "model failed, trying next");
                    last_error = Some(failure);
                }
            }
        }

        MOCK_RESPONSES.inc();
        match &last_error {
            Some(err) => warn!(error = %err, "all candidate models failed, answering with mock"),
            None => warn!("no candidate models configured, answering with mock"),
        }
        ResponseEnvelope::mock(synthesize(prompt), None)
    }

    // one candidate: first call plus at most one retry while the model loads
    async fn attempt(&self, model: &str, prompt: &str) -> AttemptOutcome {
        UPSTREAM_ATTEMPTS.inc();
        let outcome = self.client.call(model, prompt).await;

        match &outcome {
            AttemptOutcome::Failure(f)
                if f.kind == FailureKind::TransientLoading && !f.is_authorization() =>
            {
                info!(model, backoff_ms = self.retry_backoff.as_millis() as u64, "model loading, retrying once");
                LOADING_RETRIES.inc();
                tokio::time::sleep(self.retry_backoff).await;
                UPSTREAM_ATTEMPTS.inc();
                self.client.call(model, prompt).await
            }
            _ => outcome,
        }
    }
}
