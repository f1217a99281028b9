use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing \"prompt\" in request body")]
    MissingPrompt,

    #[error("Invalid configuration: {0}")]
    Config(String),

    // unexpected failure inside the orchestration task
    #[error("Orchestration failed: {0}")]
    Orchestration(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::MissingPrompt => StatusCode::BAD_REQUEST,
            GatewayError::Config(_) | GatewayError::Orchestration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
