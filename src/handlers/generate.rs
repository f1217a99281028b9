use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};
use crate::degrade::synthesize;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::models::{GenerateRequest, ResponseEnvelope};
use crate::metrics::{MOCK_RESPONSES, REQUEST_LATENCY, REQUEST_TOTAL};

// Prompt must be present and not blank; it is passed on untrimmed
pub fn validate_prompt(req: &GenerateRequest) -> Result<String, GatewayError> {
    match req.prompt.as_deref() {
        Some(p) if !p.trim().is_empty() => Ok(p.to_string()),
        _ => Err(GatewayError::MissingPrompt),
    }
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, GatewayError> {
    REQUEST_TOTAL.inc();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(error = %rejection, "unreadable generate body");
            return Err(GatewayError::MissingPrompt);
        }
    };
    let prompt = validate_prompt(&request)?;

    let start_time = Instant::now();

    // own task, so a panic during orchestration still ends in an envelope
    let orchestrator = Arc::clone(&state.orchestrator);
    let task_prompt = prompt.clone();
    let task = tokio::spawn(async move { orchestrator.generate(&task_prompt).await });

    let envelope = match task.await {
        Ok(envelope) => envelope,
        Err(join_err) => {
            let err = GatewayError::Orchestration(join_err.to_string());
            error!(error = %err, "answering with mock");
            MOCK_RESPONSES.inc();
            ResponseEnvelope::mock(synthesize(&prompt), Some(err.to_string()))
        }
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(envelope))
}
