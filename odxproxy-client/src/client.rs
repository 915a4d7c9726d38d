// ODXProxy execution engine
// Owns the connection context, turns request envelopes into HTTP calls on the
// Tokio runtime and maps every HTTP outcome to a decoded response or exactly
// one `OdxError`.

use crate::config::{ClientConfig, ClientInfo};
use crate::error::OdxError;
use crate::pending::PendingCall;
use odxproxy_core::{
    decode_error_envelope, decode_response, encode_request, Action, Request, RequestId, Response,
};
use odxproxy_transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

/// Client for the ODXProxy gateway.
///
/// A client starts without a connection context; [`Client::init`] installs
/// one, exactly once. Calls may be issued concurrently from any task once the
/// context is in place.
#[derive(Debug)]
pub struct Client {
    transport: Arc<dyn HttpTransport>,
    context: OnceLock<Arc<ClientInfo>>,
}

impl Client {
    /// Create a client backed by a `reqwest` transport built from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, OdxError> {
        let transport = ReqwestTransport::new(&(&config).into())?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client on top of a caller-provided transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            context: OnceLock::new(),
        }
    }

    /// Create a client and install its connection context in one step.
    pub fn connect(info: ClientInfo, config: ClientConfig) -> Result<Self, OdxError> {
        let client = Self::new(config)?;
        client.init(info)?;
        Ok(client)
    }

    /// Install the connection context. Fails if one is already installed.
    pub fn init(&self, info: ClientInfo) -> Result<(), OdxError> {
        let endpoint = info.endpoint();
        self.context
            .set(Arc::new(info))
            .map_err(|_| OdxError::config("client has already been initialized"))?;
        debug!("Client initialized for {}", endpoint);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.context.get().is_some()
    }

    /// The installed connection context.
    pub fn info(&self) -> Result<&ClientInfo, OdxError> {
        self.context.get().map(Arc::as_ref).ok_or_else(not_initialized)
    }

    /// Start a request envelope addressed to the installed Odoo instance.
    pub fn request(
        &self,
        action: Action,
        model: &str,
        id: Option<RequestId>,
    ) -> Result<Request, OdxError> {
        let info = self.info()?;
        Ok(Request::new(action, model, info.instance.clone()).with_id(id))
    }

    /// Dispatch `request` and decode its result as a `T`.
    ///
    /// The request is always addressed to the installed Odoo instance,
    /// whatever `odoo_instance` it was built with. Encoding, the HTTP exchange
    /// and decoding all run on a spawned task, so this returns immediately.
    /// Called outside a Tokio runtime, the returned call fails with
    /// [`OdxError::Config`].
    pub fn execute<T>(&self, request: Request) -> PendingCall<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let context = match self.context.get() {
            Some(context) => Arc::clone(context),
            None => return PendingCall::failed(not_initialized()),
        };
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                return PendingCall::failed(OdxError::config(
                    "no Tokio runtime is running, calls must be issued from within one",
                ))
            }
        };
        let transport = Arc::clone(&self.transport);
        let id = request.id.clone();

        PendingCall::spawn(&runtime, id, dispatch(transport, context, request))
    }

    /// Dispatch `request` and decode its result as a sequence of `T`.
    pub fn execute_list<T>(&self, request: Request) -> PendingCall<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.execute::<Vec<T>>(request)
    }

    pub(crate) fn submit<T>(&self, request: Result<Request, OdxError>) -> PendingCall<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match request {
            Ok(request) => self.execute(request),
            Err(err) => PendingCall::failed(err),
        }
    }
}

fn not_initialized() -> OdxError {
    OdxError::config("client has not been initialized, call init() first")
}

async fn dispatch<T: DeserializeOwned>(
    transport: Arc<dyn HttpTransport>,
    context: Arc<ClientInfo>,
    mut request: Request,
) -> Result<Response<T>, OdxError> {
    request.odoo_instance = context.instance.clone();
    let body = encode_request(&request)?;
    let url = context.endpoint();

    debug!(
        "Sending {} on {} (id {}) to {}",
        request.action, request.model_id, request.id, url
    );
    trace!("Request body:\n{}", String::from_utf8_lossy(&body));

    let http_request = HttpRequest::post(url, body)
        .with_header("Accept", "application/json")
        .with_header("Content-Type", "application/json; charset=utf-8")
        .with_header("X-Api-Key", context.api_key.as_str());

    let response = transport.post(http_request).await.map_err(|err| {
        warn!("Call {} failed in transport: {}", request.id, err);
        OdxError::from(err)
    })?;

    let outcome = resolve_response(response);
    match &outcome {
        Ok(_) => debug!("Call {} resolved", request.id),
        Err(err) => debug!("Call {} failed ({}): {}", request.id, err.kind(), err),
    }
    outcome
}

/// Map a completed HTTP exchange to a decoded response or an error.
///
/// HTTP 200 does not imply success: an envelope carrying `error` becomes
/// [`OdxError::Server`] whatever the status code.
pub fn resolve_response<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<Response<T>, OdxError> {
    if !response.is_success() {
        if let Some(error) = decode_error_envelope(&response.body) {
            return Err(OdxError::Server(error));
        }
        return Err(OdxError::HttpStatus {
            status: response.status,
            status_text: response.status_text.clone(),
            body: response.text(),
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Err(OdxError::EmptyResponse);
    }

    let envelope = match decode_response::<T>(&response.body) {
        Ok(envelope) => envelope,
        // An error envelope whose `result` has an unexpected shape is still
        // a backend error.
        Err(err) => {
            return Err(match decode_error_envelope(&response.body) {
                Some(error) => OdxError::Server(error),
                None => OdxError::Decode(err),
            })
        }
    };

    match envelope.error {
        Some(error) => Err(OdxError::Server(error)),
        None => Ok(envelope),
    }
}
