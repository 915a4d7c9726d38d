//! Async client for Odoo through the ODXProxy gateway.
//!
//! ```no_run
//! use odxproxy_client::{Client, ClientConfig, ClientInfo, InstanceInfo, KeywordRequest};
//!
//! # async fn run() -> Result<(), odxproxy_client::OdxError> {
//! let instance = InstanceInfo::new("https://erp.example.com", 2, "prod", "odoo-api-key");
//! let client = Client::connect(ClientInfo::new(instance, "gateway-api-key"), ClientConfig::default())?;
//!
//! let ids = client
//!     .search("res.partner", &[], KeywordRequest::new(), None)
//!     .await?;
//! println!("{:?}", ids.result);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod pending;

pub use client::{resolve_response, Client};
pub use config::{ClientConfig, ClientInfo, DEFAULT_GATEWAY_URL, EXECUTE_PATH};
pub use error::{ErrorKind, OdxError};
pub use pending::PendingCall;

pub use odxproxy_core::{
    params, Action, InstanceInfo, KeywordRequest, Many2One, OptionalField, Param, Request,
    RequestContext, RequestId, Response, ServerError,
};
pub use odxproxy_transport::{HttpTransport, TransportError};
