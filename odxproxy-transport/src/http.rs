use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::time::Duration;
use tracing::{debug, trace};

/// Socket-level settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Time allowed to establish a connection, in milliseconds
    pub connect_timeout_ms: u64,
    /// Time allowed for the whole exchange, in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            timeout_ms: 45_000,
            user_agent: concat!("odxproxy-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// [`HttpTransport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = ReqwestClient::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::Build(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the rest of the application.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(Box::new(err))
    } else if err.is_connect() {
        TransportError::Connect(Box::new(err))
    } else {
        TransportError::Request(Box::new(err))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("POST {} ({} bytes)", request.url, request.body.len());

        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await.map_err(classify)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(Box::new(e))
            } else {
                TransportError::Body(Box::new(e))
            }
        })?;

        debug!("Received HTTP {} ({} bytes)", status.as_u16(), body.len());
        trace!("Response body:\n{}", String::from_utf8_lossy(&body));

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
