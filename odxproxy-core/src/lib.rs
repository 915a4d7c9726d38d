// ODXProxy wire protocol
// Request/response envelopes exchanged with the gateway, correlation id
// normalization, positional parameter encoding and the adapters for Odoo's
// `false`-as-null field conventions.

pub mod codec;
pub mod error;
pub mod ids;
pub mod msg;
pub mod params;
pub mod types;

pub use codec::{decode_error_envelope, decode_response, encode_request};
pub use error::{CodecError, ServerError};
pub use ids::RequestId;
pub use msg::{Action, InstanceInfo, KeywordRequest, Request, RequestContext, Response};
pub use params::{encode_params, Param};
pub use types::{Many2One, OptionalField};
