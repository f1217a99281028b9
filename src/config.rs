use clap::Parser;
use std::time::Duration;

use crate::error::GatewayError;

pub const DEFAULT_MODELS: &str = "HuggingFaceH4/zephyr-7b-beta,gpt2,distilgpt2";
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "hf-gateway")]
#[command(about = "Text generation gateway with model fallback for Hugging Face inference")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    // Upstream credential, optional
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    // Candidate models in priority order (comma-separated)
    // Example: "HuggingFaceH4/zephyr-7b-beta,gpt2"
    #[arg(short, long, env = "HF_MODELS", default_value = DEFAULT_MODELS)]
    pub models: String,

    // Inference API base url
    #[arg(long, env = "HF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    // Wait before retrying a model that is still loading
    #[arg(long, default_value_t = 3000)]
    pub retry_backoff_ms: u64,

    // Upper bound for a single upstream call
    #[arg(long, default_value_t = 10)]
    pub attempt_timeout_secs: u64,

    #[arg(long, default_value_t = 150)]
    pub max_new_tokens: u32,

    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,
}

// validated runtime configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub token: Option<String>,
    pub models: Vec<String>,
    pub base_url: String,
    pub retry_backoff: Duration,
    pub attempt_timeout: Duration,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl GatewayConfig {
    pub fn from_args(args: &Args) -> Result<Self, GatewayError> {
        let models = parse_models(&args.models);
        if models.is_empty() {
            return Err(GatewayError::Config(
                "at least one candidate model is required".to_string(),
            ));
        }

        let base_url = args.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GatewayError::Config(format!(
                "base url must start with http:// or https://, got {:?}",
                args.base_url
            )));
        }

        // blank HF_TOKEN= in a .env file means "no token"
        let token = args
            .hf_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self {
            token,
            models,
            base_url,
            retry_backoff: Duration::from_millis(args.retry_backoff_ms),
            attempt_timeout: Duration::from_secs(args.attempt_timeout_secs),
            max_new_tokens: args.max_new_tokens,
            temperature: args.temperature,
        })
    }

    // short non-sensitive prefix of the token
    pub fn token_preview(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(|t| format!("{}...", t.chars().take(8).collect::<String>()))
    }
}

// split "a, b,,c" into ["a", "b", "c"]
fn parse_models(models: &str) -> Vec<String> {
    models
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["hf-gateway"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn parses_model_list_in_order() {
        let cfg = GatewayConfig::from_args(&args(&["--models", " a/b , c,,d "])).unwrap();
        assert_eq!(cfg.models, vec!["a/b", "c", "d"]);
    }

    #[test]
    fn empty_model_list_is_rejected() {
        let err = GatewayConfig::from_args(&args(&["--models", " , "])).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = GatewayConfig::from_args(&args(&["--base-url", "ftp://x"])).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let cfg = GatewayConfig::from_args(&args(&["--hf-token", "  "])).unwrap();
        assert!(cfg.token.is_none());
        assert!(cfg.token_preview().is_none());
    }

    #[test]
    fn token_preview_hides_the_rest() {
        let cfg =
            GatewayConfig::from_args(&args(&["--hf-token", "hf_abcdefghijklmnop"])).unwrap();
        assert_eq!(cfg.token_preview().as_deref(), Some("hf_abcde..."));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let cfg =
            GatewayConfig::from_args(&args(&["--base-url", "http://localhost:9000/"])).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9000");
    }
}
