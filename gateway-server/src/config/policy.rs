use serde::Deserialize;

/// Configuration for the policy decision point
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// The base URL of the policy decision point (default: http://localhost:8181)
    #[serde(default = "default_url")]
    pub url: String,

    /// The timeout for decision queries in seconds (default: 5)
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

fn default_url() -> String {
    "http://localhost:8181".to_string()
}

fn default_query_timeout() -> u64 {
    5
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            query_timeout: default_query_timeout(),
        }
    }
}
