use odxproxy_core::InstanceInfo;
use odxproxy_transport::TransportConfig;
use std::fmt;

/// Public ODXProxy gateway.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.odxproxy.io";

/// Path every call is posted to, relative to the gateway URL.
pub const EXECUTE_PATH: &str = "/api/odoo/execute";

/// Connection context: which Odoo instance to reach and through which gateway.
///
/// Installed once per [`Client`](crate::Client) and read-only afterwards.
#[derive(Clone)]
pub struct ClientInfo {
    pub instance: InstanceInfo,
    /// Gateway API key, sent as `X-Api-Key`
    pub api_key: String,
    pub gateway_url: String,
}

impl ClientInfo {
    pub fn new(instance: InstanceInfo, api_key: impl Into<String>) -> Self {
        Self {
            instance,
            api_key: api_key.into(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }

    pub fn with_gateway_url(mut self, gateway_url: impl Into<String>) -> Self {
        self.gateway_url = gateway_url.into();
        self
    }

    /// Full URL of the execute endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.gateway_url.trim_end_matches('/'), EXECUTE_PATH)
    }
}

impl fmt::Debug for ClientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInfo")
            .field("instance", &self.instance)
            .field("api_key", &"<redacted>")
            .field("gateway_url", &self.gateway_url)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds, covering the whole exchange
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let transport = TransportConfig::default();
        Self {
            connect_timeout_ms: transport.connect_timeout_ms,
            timeout_ms: transport.timeout_ms,
            user_agent: transport.user_agent,
        }
    }
}

impl From<&ClientConfig> for TransportConfig {
    fn from(config: &ClientConfig) -> Self {
        TransportConfig {
            connect_timeout_ms: config.connect_timeout_ms,
            timeout_ms: config.timeout_ms,
            user_agent: config.user_agent.clone(),
        }
    }
}
