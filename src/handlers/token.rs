use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use crate::state::AppState;
use crate::upstream::{AttemptOutcome, FailureKind};

const PROBE_PROMPT: &str = "Hello";

#[derive(Serialize, Debug, Default)]
pub struct TokenProbe {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl TokenProbe {
    fn invalid(error: impl Into<String>, suggestion: &str) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            suggestion: Some(suggestion.to_string()),
            ..Default::default()
        }
    }
}

// One minimal call against the first candidate to see if the token is accepted
pub async fn test_token_handler(State(state): State<Arc<AppState>>) -> Json<TokenProbe> {
    if state.config.token.is_none() {
        return Json(TokenProbe::invalid(
            "HF_TOKEN is not configured",
            "Set HF_TOKEN in the environment and restart the gateway",
        ));
    }
    let Some(model) = state.config.models.first() else {
        return Json(TokenProbe::invalid(
            "no candidate models configured",
            "Pass at least one model with --models",
        ));
    };

    let probe = match state.probe.call(model, PROBE_PROMPT).await {
        AttemptOutcome::Success(_) => TokenProbe {
            valid: true,
            model: Some(model.clone()),
            ..Default::default()
        },
        // a loading model already accepted the credential
        AttemptOutcome::Failure(f)
            if f.kind == FailureKind::TransientLoading && !f.is_authorization() =>
        {
            TokenProbe {
                valid: true,
                model: Some(model.clone()),
                error: Some(f.message),
                suggestion: Some("Model is loading, generation should work shortly".to_string()),
            }
        }
        AttemptOutcome::Failure(f) if f.is_authorization() => TokenProbe {
            model: Some(model.clone()),
            ..TokenProbe::invalid(
                f.message,
                "Token was rejected; create a new one with inference permission at https://huggingface.co/settings/tokens",
            )
        },
        AttemptOutcome::Failure(f) => TokenProbe {
            model: Some(model.clone()),
            ..TokenProbe::invalid(
                f.message,
                "Could not confirm the token; check connectivity and that the model is available",
            )
        },
    };

    if probe.valid {
        info!(model = %model, "token probe accepted");
    } else {
        warn!(model = %model, error = ?probe.error, "token probe failed");
    }
    Json(probe)
}
