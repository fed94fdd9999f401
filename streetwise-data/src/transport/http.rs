//! `reqwest`-backed [`JsonTransport`].
//!
//! The trait is synchronous so the ranking engine stays embeddable in
//! synchronous contexts. Async HTTP calls are bridged by blocking on a Tokio
//! runtime.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use streetwise_core::LookupError;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{JsonTransport, QueryParam};

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "streetwise/0.1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while constructing an [`HttpTransport`] or a client built
/// on one.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A configured endpoint is not an absolute URL.
    #[error("invalid endpoint URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser error detail.
        message: String,
    },
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpConfig {
    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking JSON transport over `reqwest`.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the transport drives requests on its own
/// current-thread runtime. Inside a multi-threaded runtime it uses that
/// runtime's handle with [`tokio::task::block_in_place`]. Inside a
/// `current_thread` runtime, which cannot be blocked in place, the request
/// runs on its own runtime from a scoped worker thread while the caller
/// waits.
///
/// Dropping the transport shuts its runtime down in the background, so it
/// may be dropped from async code.
pub struct HttpTransport {
    client: Client,
    config: HttpConfig,
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, ClientBuildError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a transport with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime: Some(runtime),
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, LookupError> {
        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, endpoint))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, endpoint))?;
        response
            .json::<Value>()
            .await
            .map_err(|err| LookupError::Parse {
                message: err.without_url().to_string(),
            })
    }

    /// Convert a `reqwest` error, dropping the request URL so query
    /// parameters such as API keys never reach error messages.
    fn convert_reqwest_error(&self, error: reqwest::Error, endpoint: &str) -> LookupError {
        if error.is_timeout() {
            return LookupError::Timeout {
                url: endpoint.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return LookupError::Http {
                url: endpoint.to_owned(),
                status: status.as_u16(),
                message: error.without_url().to_string(),
            };
        }
        LookupError::Network {
            url: endpoint.to_owned(),
            message: error.without_url().to_string(),
        }
    }

    fn block_on<F>(&self, future: F, endpoint: &str) -> Result<Value, LookupError>
    where
        F: Future<Output = Result<Value, LookupError>> + Send,
    {
        let unavailable = |message: &str| LookupError::Network {
            url: endpoint.to_owned(),
            message: message.to_owned(),
        };
        let Some(runtime) = self.runtime.as_ref() else {
            return Err(unavailable("transport runtime has shut down"));
        };
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // A current_thread runtime cannot block in place.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|_| Err(unavailable("request thread panicked")))
            }),
            Err(_) => runtime.block_on(future),
        }
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl JsonTransport for HttpTransport {
    fn get_json(&self, endpoint: &str, query: &[QueryParam]) -> Result<Value, LookupError> {
        log::debug!("GET {endpoint}");
        let request = self.client.get(endpoint).query(query);
        self.block_on(self.send(request, endpoint), endpoint)
    }

    fn post_json(
        &self,
        endpoint: &str,
        query: &[QueryParam],
        body: &Value,
    ) -> Result<Value, LookupError> {
        log::debug!("POST {endpoint}");
        let request = self.client.post(endpoint).query(query).json(body);
        self.block_on(self.send(request, endpoint), endpoint)
    }
}

/// Check that `url` is absolute and return it without a trailing slash.
pub(crate) fn endpoint_base(url: &str) -> Result<String, ClientBuildError> {
    url::Url::parse(url).map_err(|err| ClientBuildError::InvalidUrl {
        url: url.to_owned(),
        message: err.to_string(),
    })?;
    Ok(url.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("probe/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "probe/1.0");
    }

    #[rstest]
    fn transport_builds_with_defaults() {
        let transport = HttpTransport::new().expect("transport should build");
        assert_eq!(transport.config(), &HttpConfig::default());
        assert!(format!("{transport:?}").contains("HttpTransport"));
    }

    #[rstest]
    #[case("https://maps.googleapis.com/maps/api/", "https://maps.googleapis.com/maps/api")]
    #[case("http://localhost:8080", "http://localhost:8080")]
    fn endpoint_base_trims_trailing_slash(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(endpoint_base(input).expect("valid url"), expected);
    }

    #[rstest]
    fn endpoint_base_rejects_relative_urls() {
        let err = endpoint_base("maps/api").expect_err("relative url");
        assert!(matches!(err, ClientBuildError::InvalidUrl { .. }));
    }

    #[rstest]
    fn unreachable_host_reports_network_error() {
        let transport = HttpTransport::with_config(
            HttpConfig::default().with_timeout(Duration::from_secs(2)),
        )
        .expect("transport should build");
        let err = transport
            .get_json("http://127.0.0.1:9/unreachable", &[("key", "secret".to_owned())])
            .expect_err("nothing listens on the discard port");
        assert!(
            !err.to_string().contains("secret"),
            "error leaked query parameters: {err}"
        );
    }

    fn unreachable_from_async() -> LookupError {
        let transport = HttpTransport::with_config(
            HttpConfig::default().with_timeout(Duration::from_secs(2)),
        )
        .expect("transport should build");
        transport
            .get_json("http://127.0.0.1:9/", &[])
            .expect_err("nothing listens on the discard port")
    }

    #[tokio::test(flavor = "current_thread")]
    async fn current_thread_runtime_reports_errors() {
        let err = unreachable_from_async();
        assert!(
            matches!(err, LookupError::Network { .. } | LookupError::Timeout { .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn multi_thread_runtime_reports_errors() {
        let err = unreachable_from_async();
        assert!(
            matches!(err, LookupError::Network { .. } | LookupError::Timeout { .. }),
            "unexpected error: {err}"
        );
    }
}
