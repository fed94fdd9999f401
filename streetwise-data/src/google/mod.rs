//! Google Maps Platform clients.
//!
//! [`GoogleMaps`] talks to the Geocoding, Places (nearby search, details and
//! photos) and Air Quality APIs. It implements four collaborator traits:
//!
//! - [`Geocoder`](streetwise_core::Geocoder): address to position, with a
//!   country suffix and region bias.
//! - [`StreetSource`](streetwise_core::StreetSource): street names cleaned
//!   from the `vicinity` of nearby places.
//! - [`AmenityLookup`](streetwise_core::AmenityLookup): nearby search per
//!   catalog place type, enriched with place details.
//! - [`AirQualityProvider`](streetwise_core::AirQualityProvider): current
//!   conditions, preferring the universal AQI.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use streetwise_core::{AirQualityProvider, Geocoder};
//! use streetwise_data::google::{GoogleConfig, GoogleMaps};
//!
//! let maps = GoogleMaps::new(GoogleConfig::new("my-api-key"))?;
//! let location = maps.geocode("Besant Nagar, Chennai")?;
//! let reading = maps.current_conditions(location);
//! println!("AQI {:?} ({})", reading.aqi, reading.category);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod air_quality;
mod amenities;
mod geocode;
mod places;
mod responses;

pub use air_quality::rgb_to_hex;
pub use places::clean_street_name;

use streetwise_core::{AmenityCatalog, LookupError};

use crate::transport::{
    ClientBuildError, HttpConfig, HttpTransport, JsonTransport, QueryParam, endpoint_base,
};

/// Default base URL of the Maps web service APIs.
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
/// Default Air Quality current-conditions endpoint.
pub const DEFAULT_AIR_QUALITY_URL: &str =
    "https://airquality.googleapis.com/v1/currentConditions:lookup";
/// Default text appended to addresses before geocoding.
pub const DEFAULT_ADDRESS_SUFFIX: &str = ", India";
/// Default region bias for geocoding.
pub const DEFAULT_REGION: &str = "IN";
/// Default maximum width requested for photo URLs.
pub const DEFAULT_PHOTO_MAX_WIDTH: u32 = 800;

/// Configuration for [`GoogleMaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleConfig {
    /// API key; requests needing one fail with
    /// [`LookupError::MissingApiKey`] when absent.
    pub api_key: Option<String>,
    /// Base URL of the Maps web service APIs.
    pub maps_base_url: String,
    /// Air Quality current-conditions endpoint.
    pub air_quality_url: String,
    /// Text appended to every address before geocoding.
    pub address_suffix: String,
    /// Region bias passed to the geocoder, if any.
    pub region: Option<String>,
    /// Maximum width requested for photo URLs.
    pub photo_max_width: u32,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_owned(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_owned(),
            address_suffix: DEFAULT_ADDRESS_SUFFIX.to_owned(),
            region: Some(DEFAULT_REGION.to_owned()),
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
        }
    }
}

impl GoogleConfig {
    /// Create a configuration using `api_key` and default endpoints.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Set or clear the API key. Blank keys count as absent.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    /// Override the Maps base URL.
    #[must_use]
    pub fn with_maps_base_url(mut self, url: impl Into<String>) -> Self {
        self.maps_base_url = url.into();
        self
    }

    /// Override the Air Quality endpoint.
    #[must_use]
    pub fn with_air_quality_url(mut self, url: impl Into<String>) -> Self {
        self.air_quality_url = url.into();
        self
    }

    /// Set the text appended to addresses before geocoding.
    #[must_use]
    pub fn with_address_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.address_suffix = suffix.into();
        self
    }

    /// Set or clear the geocoding region bias.
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }
}

/// Client for the Google Maps Platform services.
#[derive(Debug)]
pub struct GoogleMaps<T = HttpTransport> {
    transport: T,
    config: GoogleConfig,
    catalog: AmenityCatalog,
}

impl GoogleMaps<HttpTransport> {
    /// Create a client over a default [`HttpTransport`].
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when an endpoint is not an absolute URL
    /// or the transport fails to build.
    pub fn new(config: GoogleConfig) -> Result<Self, ClientBuildError> {
        Self::with_http_config(config, HttpConfig::default())
    }

    /// Create a client over an [`HttpTransport`] built from `http`.
    ///
    /// # Errors
    /// See [`GoogleMaps::new`].
    pub fn with_http_config(config: GoogleConfig, http: HttpConfig) -> Result<Self, ClientBuildError> {
        Self::with_transport(config, HttpTransport::with_config(http)?)
    }
}

impl<T: JsonTransport> GoogleMaps<T> {
    /// Create a client over an explicit transport.
    ///
    /// # Errors
    /// Returns [`ClientBuildError::InvalidUrl`] when an endpoint is not an
    /// absolute URL.
    pub fn with_transport(mut config: GoogleConfig, transport: T) -> Result<Self, ClientBuildError> {
        config.maps_base_url = endpoint_base(&config.maps_base_url)?;
        config.air_quality_url = endpoint_base(&config.air_quality_url)?;
        Ok(Self {
            transport,
            config,
            catalog: AmenityCatalog::standard(),
        })
    }

    /// Replace the catalog that maps categories to place types.
    #[must_use]
    pub fn with_catalog(mut self, catalog: AmenityCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GoogleConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn api_key(&self, service: &'static str) -> Result<&str, LookupError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(LookupError::MissingApiKey { service })
    }

    fn maps_endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.maps_base_url)
    }

    fn get_maps<R>(&self, path: &str, query: &[QueryParam]) -> Result<R, LookupError>
    where
        R: serde::de::DeserializeOwned,
    {
        let value = self.transport.get_json(&self.maps_endpoint(path), query)?;
        crate::transport::decode(value)
    }
}

/// Accept the statuses the Maps APIs use for success.
fn ensure_ok(status: &str, error_message: Option<String>) -> Result<(), LookupError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        _ => Err(LookupError::Service {
            status: status.to_owned(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedTransport;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = GoogleConfig::default()
            .with_api_key(Some("key".to_owned()))
            .with_maps_base_url("http://localhost:9000/maps/api/")
            .with_address_suffix(", UK")
            .with_region(Some("GB".to_owned()));
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.address_suffix, ", UK");
        assert_eq!(config.region.as_deref(), Some("GB"));
    }

    #[rstest]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    #[case(None)]
    fn blank_keys_count_as_missing(#[case] key: Option<String>) {
        let config = GoogleConfig::default().with_api_key(key);
        assert!(config.api_key.is_none());
    }

    #[rstest]
    fn endpoints_are_normalised() {
        let maps = GoogleMaps::with_transport(
            GoogleConfig::new("key").with_maps_base_url("http://localhost:9000/maps/api/"),
            CannedTransport::new(),
        )
        .expect("valid config");
        assert_eq!(
            maps.maps_endpoint("geocode/json"),
            "http://localhost:9000/maps/api/geocode/json"
        );
    }

    #[rstest]
    fn rejects_relative_endpoints() {
        let err = GoogleMaps::with_transport(
            GoogleConfig::new("key").with_air_quality_url("airquality"),
            CannedTransport::new(),
        )
        .expect_err("relative url");
        assert!(matches!(err, ClientBuildError::InvalidUrl { .. }));
    }

    #[rstest]
    #[case("OK", true)]
    #[case("ZERO_RESULTS", true)]
    #[case("REQUEST_DENIED", false)]
    #[case("OVER_QUERY_LIMIT", false)]
    fn status_handling(#[case] status: &str, #[case] ok: bool) {
        assert_eq!(ensure_ok(status, None).is_ok(), ok);
    }
}
