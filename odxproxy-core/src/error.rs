use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error object reported by the backend inside a well-formed response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ServerError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        ServerError {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i64, message: impl Into<String>, data: Value) -> Self {
        ServerError {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Best-effort access to the backend's exception name, e.g.
    /// `odoo.exceptions.AccessError`, when the diagnostic data carries one.
    pub fn exception_name(&self) -> Option<&str> {
        self.data.as_ref()?.get("name")?.as_str()
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServerError {}

/// Failures while turning envelopes into bytes or bytes back into envelopes.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}
