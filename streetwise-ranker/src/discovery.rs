//! Street discovery across several sources.

use geo::Coord;
use streetwise_core::{StreetCandidate, StreetSource};

use crate::ranker::dedup_streets;

/// Default radius, in meters, searched for streets around a point.
pub const DEFAULT_STREET_RADIUS_M: u32 = 1000;

/// Merges the streets reported by several [`StreetSource`]s.
///
/// Sources are queried in the order they were added. A failing source is
/// logged and skipped. The merged list keeps first-seen order and drops
/// repeated streets.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use streetwise_core::{LookupError, StreetCandidate};
/// use streetwise_core::test_support::StubStreetSource;
/// use streetwise_ranker::StreetDiscovery;
///
/// let discovery = StreetDiscovery::new()
///     .with_source(StubStreetSource::with_streets(
///         "osm",
///         vec![StreetCandidate::new("Infantry Road", 12.98, 77.60)],
///     ))
///     .with_source(StubStreetSource::with_error(
///         "places",
///         LookupError::Parse { message: "bad json".into() },
///     ));
///
/// let streets = discovery.discover(Coord { x: 77.6, y: 12.98 }, 1000);
/// assert_eq!(streets.len(), 1);
/// ```
#[derive(Default)]
pub struct StreetDiscovery {
    sources: Vec<Box<dyn StreetSource + Send + Sync>>,
}

impl StreetDiscovery {
    /// Create a discovery with no sources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source.
    #[must_use]
    pub fn with_source<T>(mut self, source: T) -> Self
    where
        T: StreetSource + Send + Sync + 'static,
    {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of configured sources.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sources.len()
    }

    /// Report whether no source is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Streets within `radius_m` meters of `center` from every source.
    #[must_use]
    pub fn discover(&self, center: Coord<f64>, radius_m: u32) -> Vec<StreetCandidate> {
        let merged = self
            .sources
            .iter()
            .flat_map(|source| match source.streets_near(center, radius_m) {
                Ok(streets) => {
                    log::debug!("{} returned {} streets", source.source_name(), streets.len());
                    streets
                }
                Err(err) => {
                    log::warn!("street source {} failed: {err}", source.source_name());
                    Vec::new()
                }
            })
            .collect();
        dedup_streets(merged)
    }
}

impl std::fmt::Debug for StreetDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self
            .sources
            .iter()
            .map(|source| source.source_name())
            .collect();
        f.debug_struct("StreetDiscovery")
            .field("sources", &names)
            .finish()
    }
}
