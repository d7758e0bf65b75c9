use crate::config::GatewayConfig;
use crate::store::{ClientManager, ConnectionManager, MemoryClientStore, MemoryConnectionStore};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub clients: Arc<dyn ClientManager>,
    pub connections: Arc<dyn ConnectionManager>,
    pub policy_client: Arc<Client>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        let policy_client = Self::create_policy_client(&config);
        Self {
            config: Arc::new(config),
            clients: Arc::new(MemoryClientStore::new()),
            connections: Arc::new(MemoryConnectionStore::new()),
            policy_client: Arc::new(policy_client),
        }
    }

    fn create_policy_client(config: &GatewayConfig) -> reqwest::Client {
        let mut headers = HeaderMap::new();
        if !config.api_token.is_empty() {
            headers.insert(
                AUTHORIZATION,
                format!("Bearer {}", config.api_token)
                    .parse()
                    .expect("Failed to parse API token"),
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Create a specialized client for the policy decision point
        Client::builder()
            .timeout(Duration::from_secs(config.policy.query_timeout))
            .connect_timeout(Duration::from_secs(2))
            .default_headers(headers)
            // Keep up to 10 idle connections per host for 90 seconds
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .expect("Failed to create policy client")
    }
}
