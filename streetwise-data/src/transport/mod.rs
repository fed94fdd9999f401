//! JSON-over-HTTP transport used by the service clients.
//!
//! Clients describe a request as an endpoint URL plus query parameters and
//! receive decoded JSON. Keeping query parameters separate from the endpoint
//! means errors can name the endpoint without leaking API keys.
//!
//! [`HttpTransport`] performs real requests with `reqwest`; the
//! [`JsonTransport`] trait lets tests substitute canned responses.

mod http;

pub use http::{ClientBuildError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpConfig, HttpTransport};
pub(crate) use http::endpoint_base;

use serde_json::Value;
use streetwise_core::LookupError;

/// One query-string parameter.
pub type QueryParam = (&'static str, String);

/// Blocking JSON transport.
///
/// Implementations must return [`LookupError::Http`] for non-success status
/// codes and [`LookupError::Parse`] for bodies that are not JSON.
pub trait JsonTransport {
    /// `GET endpoint?query` and decode the body.
    ///
    /// # Errors
    /// Returns [`LookupError`] when the request fails or the body is not JSON.
    fn get_json(&self, endpoint: &str, query: &[QueryParam]) -> Result<Value, LookupError>;

    /// `POST endpoint?query` with a JSON `body` and decode the response.
    ///
    /// # Errors
    /// Returns [`LookupError`] when the request fails or the body is not JSON.
    fn post_json(
        &self,
        endpoint: &str,
        query: &[QueryParam],
        body: &Value,
    ) -> Result<Value, LookupError>;
}

/// Decode a JSON value into a typed response.
pub(crate) fn decode<T>(value: Value) -> Result<T, LookupError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| LookupError::Parse {
        message: err.to_string(),
    })
}
