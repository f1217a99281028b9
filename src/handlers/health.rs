use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use crate::state::AppState;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub has_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_preview: Option<String>,
}

// health handler
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        has_token: state.config.token.is_some(),
        token_preview: state.config.token_preview(),
    })
}

pub async fn root_handler() -> impl IntoResponse {
    "HuggingFace API backend is running."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::test_state;
    use crate::orchestrator::tests::StubClient;

    #[tokio::test]
    async fn no_token_is_reported_every_time() {
        let state = test_state(Arc::new(StubClient::new()), None);
        for _ in 0..3 {
            let Json(report) = health_handler(State(state.clone())).await;
            assert!(!report.has_token);
            let v = serde_json::to_value(&report).unwrap();
            assert_eq!(v["hasToken"], false);
            assert!(v.get("tokenPreview").is_none());
        }
    }

    #[tokio::test]
    async fn token_is_only_previewed() {
        let token = "hf_supersecretvalue123";
        let state = test_state(Arc::new(StubClient::new()), Some(token));
        let Json(report) = health_handler(State(state)).await;

        assert!(report.has_token);
        let preview = report.token_preview.unwrap();
        assert!(token.starts_with(preview.trim_end_matches("...")));
        assert_ne!(preview, token);
        assert!(!preview.contains("secretvalue"));
    }
}
