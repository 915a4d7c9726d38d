use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures that prevented an HTTP response from being obtained at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] BoxError),
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),
    #[error("request failed: {0}")]
    Request(#[source] BoxError),
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),
    #[error("request cancelled")]
    Cancelled,
}

/// An outbound POST described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        HttpRequest {
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        HttpResponse {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// HTTP client used to reach the gateway.
///
/// Implementations must be safe to share between concurrent calls; pooling,
/// TLS and socket timeouts are their concern.
#[async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Issue a POST. Any response, including non-2xx, is `Ok`; `Err` means
    /// no response was obtained.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
