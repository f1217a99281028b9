use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::GatewayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    // model is cold-starting, worth one more try
    TransientLoading,
    HttpError,
    NetworkError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamFailure {
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamFailure {
    pub fn new(kind: FailureKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    // credential rejected: status first, message text for string-only failures
    pub fn is_authorization(&self) -> bool {
        matches!(self.status, Some(401 | 403))
            || self.message.contains("403")
            || self.message.contains("Forbidden")
    }
}

impl fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

// result of one call to one candidate model
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success(Value),
    Failure(UpstreamFailure),
}

// one call to a remote generation endpoint, failures come back as values
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn call(&self, model: &str, prompt: &str) -> AttemptOutcome;
}

// Hugging Face inference request body
#[derive(Serialize, Debug)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize, Debug)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    return_full_text: bool,
    pad_token_id: u32,
}

#[derive(Serialize, Debug)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

// gpt2 family end-of-text token
const PAD_TOKEN_ID: u32 = 50256;

// Hugging Face inference API client
pub struct HfClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    max_new_tokens: u32,
    temperature: f32,
}

impl HfClient {
    pub fn new(client: reqwest::Client, config: &GatewayConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            timeout: config.attempt_timeout,
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        }
    }

    // smaller output budget for /test-token
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    fn body<'a>(&self, prompt: &'a str) -> InferenceRequest<'a> {
        InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                do_sample: true,
                return_full_text: false,
                pad_token_id: PAD_TOKEN_ID,
            },
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: false,
            },
        }
    }
}

#[async_trait]
impl UpstreamClient for HfClient {
    async fn call(&self, model: &str, prompt: &str) -> AttemptOutcome {
        let Some(token) = self.token.as_deref() else {
            return AttemptOutcome::Failure(UpstreamFailure::new(
                FailureKind::HttpError,
                Some(401),
                "401: no upstream credential configured",
            ));
        };

        let url = self.endpoint(model);
        debug!(model, url = %url, "calling upstream");

        let result = self
            .client
            .post(&url)
            .bearer_auth(token)
            .timeout(self.timeout)
            .json(&self.body(prompt))
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                return AttemptOutcome::Failure(UpstreamFailure::new(
                    FailureKind::NetworkError,
                    None,
                    format!("Request failed: {}", e),
                ));
            }
        };

        let status = res.status();
        let text = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                return AttemptOutcome::Failure(UpstreamFailure::new(
                    FailureKind::NetworkError,
                    Some(status.as_u16()),
                    format!("Failed to read body: {}", e),
                ));
            }
        };

        classify(status.as_u16(), status.is_success(), text)
    }
}

fn mentions_loading(text: &str) -> bool {
    text.to_ascii_lowercase().contains("loading")
}

// Turn a finished HTTP exchange into an attempt outcome
fn classify(status: u16, success: bool, text: String) -> AttemptOutcome {
    if !success {
        let kind = if mentions_loading(&text) {
            FailureKind::TransientLoading
        } else {
            FailureKind::HttpError
        };
        return AttemptOutcome::Failure(UpstreamFailure::new(
            kind,
            Some(status),
            format!("{}: {}", status, text),
        ));
    }

    if text.trim().is_empty() {
        return AttemptOutcome::Failure(UpstreamFailure::new(
            FailureKind::HttpError,
            Some(status),
            format!("{}: empty response body", status),
        ));
    }

    let payload: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(_) => return AttemptOutcome::Success(Value::String(text)),
    };

    // some endpoints answer 200 with {"error": "..."}
    if let Some(err) = payload.get("error") {
        let message = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let kind = if mentions_loading(&message) {
            FailureKind::TransientLoading
        } else {
            FailureKind::HttpError
        };
        return AttemptOutcome::Failure(UpstreamFailure::new(
            kind,
            Some(status),
            format!("{}: {}", status, message),
        ));
    }

    AttemptOutcome::Success(payload)
}
