//! Construction of the external collaborators used by the commands.
//!
//! Commands receive a [`CollaboratorBuilder`] so tests can substitute
//! deterministic doubles for the HTTP clients.

use std::sync::Arc;
use std::time::Duration;

use streetwise_core::{AirQualityProvider, AmenityLookup, Geocoder};
use streetwise_data::{
    GoogleConfig, GoogleMaps, HttpConfig, HttpTransport, OverpassConfig, OverpassStreetSource,
};
use streetwise_ranker::StreetDiscovery;

use crate::CliError;

const GOOGLE_SERVICE: &str = "Google Maps";
const OVERPASS_SERVICE: &str = "Overpass";

/// Settings for the HTTP collaborators, resolved from layered config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    /// Google Maps Platform key; lookups degrade when absent.
    pub(crate) google_api_key: Option<String>,
    /// Overpass interpreter endpoint.
    pub(crate) overpass_url: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
}

impl ServiceConfig {
    fn http(&self) -> HttpConfig {
        HttpConfig::default().with_timeout(self.timeout)
    }

    fn google(&self) -> Result<Arc<GoogleMaps<HttpTransport>>, CliError> {
        if self.google_api_key.is_none() {
            log::warn!("no Google API key configured; lookups will return no data");
        }
        let config = GoogleConfig::default().with_api_key(self.google_api_key.clone());
        GoogleMaps::with_http_config(config, self.http())
            .map(Arc::new)
            .map_err(|source| CliError::BuildClient {
                service: GOOGLE_SERVICE,
                source,
            })
    }
}

/// Collaborators for the `search` command.
pub(crate) struct SurveyServices {
    pub(crate) geocoder: Box<dyn Geocoder>,
    pub(crate) air_quality: Box<dyn AirQualityProvider>,
}

/// Collaborators for the `streets` command.
pub(crate) struct RankingServices {
    pub(crate) discovery: StreetDiscovery,
    pub(crate) lookup: Box<dyn AmenityLookup>,
}

/// Builds collaborators for the current invocation.
pub(crate) trait CollaboratorBuilder {
    fn survey(&self, config: &ServiceConfig) -> Result<SurveyServices, CliError>;
    fn ranking(&self, config: &ServiceConfig) -> Result<RankingServices, CliError>;
}

/// Google Maps and Overpass over HTTP.
pub(crate) struct HttpCollaborators;

impl CollaboratorBuilder for HttpCollaborators {
    fn survey(&self, config: &ServiceConfig) -> Result<SurveyServices, CliError> {
        let maps = config.google()?;
        Ok(SurveyServices {
            geocoder: Box::new(Arc::clone(&maps)),
            air_quality: Box::new(maps),
        })
    }

    fn ranking(&self, config: &ServiceConfig) -> Result<RankingServices, CliError> {
        let maps = config.google()?;
        let overpass = OverpassStreetSource::with_transport(
            OverpassConfig::default().with_url(config.overpass_url.clone()),
            HttpTransport::with_config(config.http()).map_err(|source| CliError::BuildClient {
                service: OVERPASS_SERVICE,
                source,
            })?,
        )
        .map_err(|source| CliError::BuildClient {
            service: OVERPASS_SERVICE,
            source,
        })?;
        Ok(RankingServices {
            discovery: StreetDiscovery::new()
                .with_source(overpass)
                .with_source(Arc::clone(&maps)),
            lookup: Box::new(maps),
        })
    }
}
