use crate::config::policy::PolicyConfig;
use config::{Config as ConfigCrate, ConfigError};
use serde::Deserialize;

pub mod policy;

/// Main configuration structure for the gateway server
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Token attached to policy decision point requests; empty disables it
    #[serde(default)]
    pub api_token: String,

    /// The port the gateway server will listen to (default: 4445)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Policy decision point configuration
    #[serde(default)]
    pub policy: PolicyConfig,
}

pub(crate) fn default_port() -> u16 {
    4445
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_token: "".to_string(),
            port: default_port(),
            policy: PolicyConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Creates a new configuration instance from environment variables.
    ///
    /// Keys use the `GATEWAY_` prefix; nested sections are separated with a
    /// double underscore (e.g. `GATEWAY_POLICY__URL`).
    pub fn new() -> Result<Self, String> {
        ConfigCrate::builder()
            .add_source(
                config::Environment::with_prefix("GATEWAY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e: ConfigError| e.to_string())?
            .try_deserialize()
            .map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(policy_mock: &wiremock::MockServer) -> Self {
        Self {
            api_token: "test-api-token".to_string(),
            port: 0, // Let the OS choose a port
            policy: PolicyConfig {
                url: policy_mock.uri(),
                query_timeout: 5,
            },
        }
    }
}
