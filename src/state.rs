use std::sync::Arc;
use crate::config::GatewayConfig;
use crate::orchestrator::Orchestrator;
use crate::upstream::UpstreamClient;

// app's shared state, read-only after startup

pub struct AppState {
    pub config: GatewayConfig,
    pub orchestrator: Arc<Orchestrator>,
    pub probe: Arc<dyn UpstreamClient>, // minimal-output client for /test-token
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        client: Arc<dyn UpstreamClient>,
        probe: Arc<dyn UpstreamClient>,
    ) -> Self {
        let orchestrator = Arc::new(Orchestrator::new(
            client,
            config.models.clone(),
            config.retry_backoff,
        ));
        Self {
            config,
            orchestrator,
            probe,
        }
    }
}
