use serde::{Deserialize, Serialize};

/// DoH server and HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// DoH endpoint, e.g. `https://dns.google/dns-query`
    #[serde(default = "default_url")]
    pub url: String,

    /// Overall budget for one exchange, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// Skip ALPN and speak HTTP/2 directly
    #[serde(default)]
    pub http2_prior_knowledge: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            http2_prior_knowledge: false,
        }
    }
}

fn default_url() -> String {
    "https://dns.google/dns-query".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_connect_timeout_ms() -> u64 {
    3000
}

fn default_pool_max_idle_per_host() -> usize {
    4
}
