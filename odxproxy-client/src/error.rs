use odxproxy_core::{CodecError, ServerError};
use odxproxy_transport::TransportError;
use std::fmt;
use thiserror::Error;

/// Every way a call can fail. Exactly one is delivered per failed call.
#[derive(Debug, Error)]
pub enum OdxError {
    /// The client has no connection context yet, or was given a second one.
    #[error("configuration error: {0}")]
    Config(String),

    /// No HTTP response was obtained.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx response whose body was not an error envelope.
    #[error("HTTP {status} {status_text}: {body}")]
    HttpStatus {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The backend reported an error inside a well-formed envelope.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// The envelope or its payload could not be (de)serialized.
    #[error("{0}")]
    Decode(#[from] CodecError),

    /// 2xx response with no body.
    #[error("empty response from server")]
    EmptyResponse,
}

/// Discriminant of [`OdxError`], handy for metrics labels and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Transport,
    HttpStatus,
    Server,
    Decode,
    EmptyResponse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Config => "config",
            ErrorKind::Transport => "transport",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Server => "server",
            ErrorKind::Decode => "decode",
            ErrorKind::EmptyResponse => "empty_response",
        };
        f.write_str(s)
    }
}

impl OdxError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        OdxError::Config(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OdxError::Config(_) => ErrorKind::Config,
            OdxError::Transport(_) => ErrorKind::Transport,
            OdxError::HttpStatus { .. } => ErrorKind::HttpStatus,
            OdxError::Server(_) => ErrorKind::Server,
            OdxError::Decode(_) => ErrorKind::Decode,
            OdxError::EmptyResponse => ErrorKind::EmptyResponse,
        }
    }

    /// The backend error payload, if this is a server error.
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            OdxError::Server(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(OdxError::config("x").kind(), ErrorKind::Config);
        assert_eq!(OdxError::EmptyResponse.kind(), ErrorKind::EmptyResponse);
        assert_eq!(
            OdxError::from(TransportError::Cancelled).kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            OdxError::from(ServerError::new(200, "Odoo Server Error")).kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_server_error_accessor() {
        let err = OdxError::from(ServerError::new(404, "Record not found"));
        assert_eq!(err.server_error().map(|e| e.code), Some(404));
        assert!(OdxError::EmptyResponse.server_error().is_none());
    }

    #[test]
    fn test_display() {
        let err = OdxError::HttpStatus {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "<html>upstream down</html>".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: <html>upstream down</html>");

        let err = OdxError::from(ServerError::new(200, "Odoo Server Error"));
        assert_eq!(err.to_string(), "server error 200: Odoo Server Error");

        assert_eq!(ErrorKind::HttpStatus.to_string(), "http_status");
    }
}
