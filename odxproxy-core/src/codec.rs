use crate::error::{CodecError, ServerError};
use crate::msg::{Request, Response};
use bytes::Bytes;
use serde::de::{DeserializeOwned, IgnoredAny};

/// Serialize a request envelope to the JSON body posted to the gateway.
pub fn encode_request(request: &Request) -> Result<Bytes, CodecError> {
    let json = serde_json::to_vec(request).map_err(CodecError::Encode)?;
    Ok(Bytes::from(json))
}

/// Decode a response envelope whose `result` is expected to be a `T`.
pub fn decode_response<T: DeserializeOwned>(data: &[u8]) -> Result<Response<T>, CodecError> {
    serde_json::from_slice(data).map_err(CodecError::Decode)
}

/// Pull the backend error out of a body, whatever its `result` looks like.
///
/// Used for non-2xx responses, where only a populated `error` is of interest.
pub fn decode_error_envelope(data: &[u8]) -> Option<ServerError> {
    serde_json::from_slice::<Response<IgnoredAny>>(data)
        .ok()
        .and_then(|response| response.error)
}
