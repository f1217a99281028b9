mod health;
mod metrics;
mod generate;
mod token;

use axum::{Router, routing::{get, post}};
use std::sync::Arc;
use crate::state::AppState;

use health::{health_handler, root_handler};
use metrics::metrics_handler;
use generate::generate_handler;
use token::test_token_handler;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler)) // original frontend path
        .route("/test-token", get(test_token_handler))
        .route("/generate", post(generate_handler))
        .route("/api/hf/generate", post(generate_handler)) // original frontend path
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::upstream::UpstreamClient;
    use std::time::Duration;

    pub(crate) fn test_config(token: Option<&str>) -> GatewayConfig {
        GatewayConfig {
            token: token.map(str::to_string),
            models: vec!["m1".to_string(), "m2".to_string()],
            base_url: "http://127.0.0.1:1".to_string(),
            retry_backoff: Duration::ZERO,
            attempt_timeout: Duration::from_secs(1),
            max_new_tokens: 150,
            temperature: 0.7,
        }
    }

    pub(crate) fn test_state_with_probe(
        client: Arc<dyn UpstreamClient>,
        probe: Arc<dyn UpstreamClient>,
        token: Option<&str>,
    ) -> Arc<AppState> {
        Arc::new(AppState::new(test_config(token), client, probe))
    }

    pub(crate) fn test_state(client: Arc<dyn UpstreamClient>, token: Option<&str>) -> Arc<AppState> {
        test_state_with_probe(client.clone(), client, token)
    }

    // serve the router on an ephemeral port, returns the base url
    pub(crate) async fn spawn_server(state: Arc<AppState>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn health_and_metrics_routes_respond() {
        let stub = Arc::new(crate::orchestrator::tests::StubClient::new());
        let base = spawn_server(test_state(stub, None)).await;

        let http = crate::upstream::tests::test_http();

        let health: serde_json::Value = http
            .get(format!("{base}/health"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["hasToken"], false);
        assert_eq!(health["status"], "ok");

        let res = http.get(format!("{base}/api/health")).send().await.unwrap();
        assert!(res.status().is_success());
        let health: serde_json::Value = res.json().await.unwrap();
        assert_eq!(health["hasToken"], false);

        let res = http.get(format!("{base}/metrics")).send().await.unwrap();
        assert!(res.status().is_success());

        let banner = http.get(format!("{base}/")).send().await.unwrap().text().await.unwrap();
        assert!(banner.contains("running"));
    }
}
