//! OpenStreetMap street discovery through the Overpass API.
//!
//! The query selects residential and living streets whose geometry lies
//! within the search radius and asks Overpass for each way's centre point.
//! Only named ways with a centre become candidates.

use std::collections::HashSet;

use geo::Coord;
use serde::Deserialize;
use streetwise_core::{LookupError, StreetCandidate, StreetSource};

use crate::transport::{
    ClientBuildError, HttpConfig, HttpTransport, JsonTransport, decode, endpoint_base,
};

/// Default public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const SOURCE_NAME: &str = "OpenStreetMap Overpass";

/// Configuration for [`OverpassStreetSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassConfig {
    /// Interpreter endpoint.
    pub url: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Override the interpreter endpoint.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Overpass QL selecting residential and living streets around a point.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use streetwise_data::overpass::street_query;
///
/// let query = street_query(Coord { x: 80.25, y: 13.0 }, 500);
/// assert!(query.contains("way(around:500,13,80.25)"));
/// ```
#[must_use]
pub fn street_query(center: Coord<f64>, radius_m: u32) -> String {
    format!(
        "[out:json];(way(around:{radius_m},{lat},{lng})[\"highway\"~\"^(residential|living_street)$\"];);out center;",
        lat = center.y,
        lng = center.x,
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    tags: Option<Tags>,
    center: Option<Center>,
}

#[derive(Debug, Deserialize)]
struct Tags {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

/// [`StreetSource`] backed by the Overpass API.
#[derive(Debug)]
pub struct OverpassStreetSource<T = HttpTransport> {
    transport: T,
    config: OverpassConfig,
}

impl OverpassStreetSource<HttpTransport> {
    /// Create a source over a default [`HttpTransport`].
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the endpoint is not an absolute URL
    /// or the transport fails to build.
    pub fn new(config: OverpassConfig) -> Result<Self, ClientBuildError> {
        Self::with_transport(config, HttpTransport::with_config(HttpConfig::default())?)
    }
}

impl<T: JsonTransport> OverpassStreetSource<T> {
    /// Create a source over an explicit transport.
    ///
    /// # Errors
    /// Returns [`ClientBuildError::InvalidUrl`] when the endpoint is not an
    /// absolute URL.
    pub fn with_transport(mut config: OverpassConfig, transport: T) -> Result<Self, ClientBuildError> {
        config.url = endpoint_base(&config.url)?;
        Ok(Self { transport, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: JsonTransport> StreetSource for OverpassStreetSource<T> {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    fn streets_near(
        &self,
        center: Coord<f64>,
        radius_m: u32,
    ) -> Result<Vec<StreetCandidate>, LookupError> {
        let query = [("data", street_query(center, radius_m))];
        let response: OverpassResponse = decode(self.transport.get_json(&self.config.url, &query)?)?;
        let mut seen = HashSet::new();
        let streets: Vec<StreetCandidate> = response
            .elements
            .into_iter()
            .filter_map(|element| {
                let name = element.tags?.name?;
                let Center { lat, lon } = element.center?;
                Some(StreetCandidate::new(name, lat, lon))
            })
            .filter(|street| seen.insert(street.name.clone()))
            .collect();
        log::debug!("overpass returned {} named streets", streets.len());
        Ok(streets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedTransport;
    use rstest::rstest;
    use serde_json::json;

    fn source(transport: CannedTransport) -> OverpassStreetSource<CannedTransport> {
        OverpassStreetSource::with_transport(OverpassConfig::default(), transport)
            .expect("valid config")
    }

    #[rstest]
    fn query_targets_residential_ways() {
        assert_eq!(
            street_query(Coord { x: 77.5946, y: 12.9716 }, 1000),
            "[out:json];(way(around:1000,12.9716,77.5946)[\"highway\"~\"^(residential|living_street)$\"];);out center;"
        );
    }

    #[rstest]
    fn keeps_named_ways_with_centres() {
        let transport = CannedTransport::new().with_response(
            DEFAULT_OVERPASS_URL,
            json!({
                "elements": [
                    {"type": "way", "tags": {"name": "4th Cross Road", "highway": "residential"},
                     "center": {"lat": 12.97, "lon": 77.59}},
                    {"type": "way", "tags": {"highway": "residential"},
                     "center": {"lat": 12.98, "lon": 77.60}},
                    {"type": "way", "tags": {"name": "Lane Without Centre"}},
                    {"type": "way", "tags": {"name": "4th Cross Road"},
                     "center": {"lat": 12.99, "lon": 77.61}},
                    {"type": "way", "tags": {"name": "Kasturba Road"},
                     "center": {"lat": 12.96, "lon": 77.58}}
                ]
            }),
        );
        let overpass = source(transport);
        let streets = overpass
            .streets_near(Coord { x: 77.59, y: 12.97 }, 800)
            .expect("lookup succeeds");
        assert_eq!(
            streets,
            vec![
                StreetCandidate::new("4th Cross Road", 12.97, 77.59),
                StreetCandidate::new("Kasturba Road", 12.96, 77.58),
            ]
        );

        let requests = overpass.transport().requests();
        let request = requests.first().expect("one request");
        assert_eq!(
            request.param("data"),
            Some(street_query(Coord { x: 77.59, y: 12.97 }, 800).as_str())
        );
    }

    #[rstest]
    fn http_failures_propagate() {
        let error = LookupError::Http {
            url: DEFAULT_OVERPASS_URL.to_owned(),
            status: 504,
            message: "gateway timeout".to_owned(),
        };
        let overpass = source(CannedTransport::new().with_error(DEFAULT_OVERPASS_URL, error.clone()));
        let err = overpass
            .streets_near(Coord { x: 0.0, y: 0.0 }, 100)
            .expect_err("gateway timeout");
        assert_eq!(err, error);
    }

    #[rstest]
    fn endpoint_is_validated_and_trimmed() {
        let overpass = OverpassStreetSource::with_transport(
            OverpassConfig::default().with_url("http://localhost:12345/api/interpreter/"),
            CannedTransport::new(),
        )
        .expect("absolute url");
        assert_eq!(overpass.config().url, "http://localhost:12345/api/interpreter");

        let err = OverpassStreetSource::with_transport(
            OverpassConfig::default().with_url("api/interpreter"),
            CannedTransport::new(),
        )
        .expect_err("relative url");
        assert!(matches!(err, ClientBuildError::InvalidUrl { .. }));
    }

    #[rstest]
    fn empty_payload_yields_no_streets() {
        let overpass = source(CannedTransport::new().with_response(DEFAULT_OVERPASS_URL, json!({})));
        let streets = overpass
            .streets_near(Coord { x: 0.0, y: 0.0 }, 100)
            .expect("lookup succeeds");
        assert!(streets.is_empty());
    }
}
