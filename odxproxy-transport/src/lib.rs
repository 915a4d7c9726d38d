pub mod http;
pub mod transport;

pub use http::{ReqwestTransport, TransportConfig};
pub use transport::{BoxError, HttpRequest, HttpResponse, HttpTransport, TransportError};
