use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const MOCK_MODEL: &str = "mock";

// Inbound request body; prompt stays optional so a missing field is ours to report
#[derive(Deserialize, Debug, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

// Canonical shape every successful upstream payload converges to
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NormalizedResult {
    pub generated_text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    pub model: String,
    pub timestamp: String,
    #[serde(rename = "isMock")]
    pub is_mock: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

// /generate body on 200; only built via upstream() or mock() so is_mock matches model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub generated_text: String,
    #[serde(rename = "_meta")]
    pub meta: ResponseMeta,
}

impl ResponseEnvelope {
    pub fn upstream(model: &str, result: NormalizedResult) -> Self {
        Self {
            generated_text: result.generated_text,
            meta: ResponseMeta {
                model: model.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                is_mock: false,
                error: None,
            },
        }
    }

    pub fn mock(generated_text: String, error: Option<String>) -> Self {
        Self {
            generated_text,
            meta: ResponseMeta {
                model: MOCK_MODEL.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                is_mock: true,
                error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_envelope_serializes_meta_keys() {
        let env = ResponseEnvelope::mock("hi".into(), Some("boom".into()));
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["_meta"]["model"], "mock");
        assert_eq!(v["_meta"]["isMock"], true);
        assert_eq!(v["_meta"]["error"], "boom");
        assert!(chrono::DateTime::parse_from_rfc3339(v["_meta"]["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn upstream_envelope_omits_error() {
        let env = ResponseEnvelope::upstream(
            "gpt2",
            NormalizedResult { generated_text: "x".into() },
        );
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["_meta"]["isMock"], false);
        assert!(v["_meta"].get("error").is_none());
    }
}
