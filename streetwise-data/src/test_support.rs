//! Canned JSON transport for exercising the service clients offline.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use streetwise_core::LookupError;

use crate::transport::{JsonTransport, QueryParam};

/// HTTP verb of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// A request observed by [`CannedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP verb.
    pub method: Method,
    /// Endpoint without query string.
    pub endpoint: String,
    /// Query parameters in the order supplied.
    pub query: Vec<(String, String)>,
    /// JSON body of `POST` requests.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of the first query parameter called `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// [`JsonTransport`] answering from a table keyed by endpoint.
///
/// Every request is recorded. Endpoints missing from the table fail with
/// an HTTP 404 error.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use streetwise_data::test_support::CannedTransport;
/// use streetwise_data::transport::JsonTransport;
///
/// let transport = CannedTransport::new().with_response("http://svc/a", json!({"ok": true}));
/// let body = transport.get_json("http://svc/a", &[("q", "1".to_owned())])?;
/// assert_eq!(body, json!({"ok": true}));
/// assert_eq!(transport.requests()[0].param("q"), Some("1"));
/// # Ok::<(), streetwise_core::LookupError>(())
/// ```
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: HashMap<String, Result<Value, LookupError>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl CannedTransport {
    /// Create a transport with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests to `endpoint` with `body`.
    #[must_use]
    pub fn with_response(mut self, endpoint: impl Into<String>, body: Value) -> Self {
        self.responses.insert(endpoint.into(), Ok(body));
        self
    }

    /// Fail requests to `endpoint` with `error`.
    #[must_use]
    pub fn with_error(mut self, endpoint: impl Into<String>, error: LookupError) -> Self {
        self.responses.insert(endpoint.into(), Err(error));
        self
    }

    /// Requests made so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer(
        &self,
        method: Method,
        endpoint: &str,
        query: &[QueryParam],
        body: Option<&Value>,
    ) -> Result<Value, LookupError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                endpoint: endpoint.to_owned(),
                query: query
                    .iter()
                    .map(|(key, value)| ((*key).to_owned(), value.clone()))
                    .collect(),
                body: body.cloned(),
            });
        self.responses
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| {
                Err(LookupError::Http {
                    url: endpoint.to_owned(),
                    status: 404,
                    message: "no canned response".to_owned(),
                })
            })
    }
}

impl JsonTransport for CannedTransport {
    fn get_json(&self, endpoint: &str, query: &[QueryParam]) -> Result<Value, LookupError> {
        self.answer(Method::Get, endpoint, query, None)
    }

    fn post_json(
        &self,
        endpoint: &str,
        query: &[QueryParam],
        body: &Value,
    ) -> Result<Value, LookupError> {
        self.answer(Method::Post, endpoint, query, Some(body))
    }
}
