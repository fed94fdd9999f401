use thiserror::Error;

/// Errors from an external lookup.
///
/// URLs recorded here never include query strings, so API keys stay out of
/// logs and error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The service requires an API key and none was configured.
    #[error("no API key configured for {service}")]
    MissingApiKey {
        /// Human-readable service name.
        service: &'static str,
    },

    /// A network error occurred while contacting the service.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Endpoint that was contacted.
        url: String,
        /// Description of the network error.
        message: String,
    },

    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that timed out.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Endpoint that failed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },

    /// The service answered but reported a failure in its payload.
    #[error("service returned status {status}: {message}")]
    Service {
        /// Service-specific status string.
        status: String,
        /// Error detail, possibly empty.
        message: String,
    },

    /// The response could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error detail.
        message: String,
    },
}

/// Errors from [`Geocoder::geocode`](super::Geocoder::geocode).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The address could not be resolved to a position.
    #[error("unable to geocode the address '{address}'")]
    Unresolvable {
        /// The address as supplied by the caller.
        address: String,
    },

    /// The geocoding service itself failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
