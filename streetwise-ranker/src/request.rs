//! Ranking requests around a point.

use geo::Coord;
use serde::{Deserialize, Serialize};
use streetwise_core::{
    AmenityLookup, NoiseEstimator, ScoredStreet, StreetScorer, WeightVector,
};
use thiserror::Error;

use crate::discovery::{DEFAULT_STREET_RADIUS_M, StreetDiscovery};
use crate::event::ProgressSink;
use crate::ranker::{DEFAULT_AMENITY_RADIUS_M, Ranker, drain};

/// Parameters for ranking the streets around a point.
///
/// Deserialises from `{lat, lng, street_radius, amenity_radius, weights}`;
/// the radii default to 1000 m and 400 m and the weights to the catalog
/// defaults.
///
/// # Examples
/// ```
/// use streetwise_ranker::RankingRequest;
///
/// let request: RankingRequest = serde_json::from_str(r#"{"lat": 12.97, "lng": 77.59}"#)?;
/// assert_eq!(request.street_radius, 1000);
/// assert_eq!(request.amenity_radius, 400);
/// assert!(request.weights.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    /// Latitude of the search centre in degrees.
    pub lat: f64,
    /// Longitude of the search centre in degrees.
    pub lng: f64,
    /// Radius, in meters, searched for streets.
    #[serde(default = "default_street_radius")]
    pub street_radius: u32,
    /// Radius, in meters, searched for amenities around each street.
    #[serde(default = "default_amenity_radius")]
    pub amenity_radius: u32,
    /// Caller's category weights; empty means catalog defaults.
    #[serde(default)]
    pub weights: WeightVector,
}

const fn default_street_radius() -> u32 {
    DEFAULT_STREET_RADIUS_M
}

const fn default_amenity_radius() -> u32 {
    DEFAULT_AMENITY_RADIUS_M
}

impl RankingRequest {
    /// A request with default radii and weights.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            street_radius: DEFAULT_STREET_RADIUS_M,
            amenity_radius: DEFAULT_AMENITY_RADIUS_M,
            weights: WeightVector::new(),
        }
    }

    /// Search centre as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn center(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }

    /// Check coordinates and radii.
    ///
    /// # Errors
    /// Returns [`RequestError`] when a coordinate is out of range or not
    /// finite, or when either radius is zero.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)) {
            return Err(RequestError::InvalidLatitude { lat: self.lat });
        }
        if !(self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng)) {
            return Err(RequestError::InvalidLongitude { lng: self.lng });
        }
        if self.street_radius == 0 {
            return Err(RequestError::ZeroRadius {
                field: "street_radius",
            });
        }
        if self.amenity_radius == 0 {
            return Err(RequestError::ZeroRadius {
                field: "amenity_radius",
            });
        }
        Ok(())
    }
}

/// Errors returned by [`RankingRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// Latitude outside `-90..=90` or not finite.
    #[error("latitude {lat} is out of range")]
    InvalidLatitude {
        /// The rejected latitude.
        lat: f64,
    },
    /// Longitude outside `-180..=180` or not finite.
    #[error("longitude {lng} is out of range")]
    InvalidLongitude {
        /// The rejected longitude.
        lng: f64,
    },
    /// A search radius was zero.
    #[error("{field} must be greater than zero")]
    ZeroRadius {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl<S, N> Ranker<S, N>
where
    S: StreetScorer,
    N: NoiseEstimator,
{
    /// Discover the streets around `request`'s centre and rank them.
    ///
    /// Streets are searched within `street_radius`; amenities around each
    /// street within `amenity_radius`, overriding the ranker's configured
    /// radius. Events are delivered to `sink` as in [`Ranker::rank`].
    ///
    /// # Errors
    /// Returns [`RequestError`] when the request fails validation. No events
    /// are emitted in that case.
    pub fn rank_around<L, P>(
        &self,
        request: &RankingRequest,
        discovery: &StreetDiscovery,
        lookup: &L,
        sink: &mut P,
    ) -> Result<Vec<ScoredStreet>, RequestError>
    where
        L: AmenityLookup + ?Sized,
        P: ProgressSink + ?Sized,
    {
        request.validate()?;
        let streets = discovery.discover(request.center(), request.street_radius);
        log::info!(
            "found {} streets within {} m of ({}, {})",
            streets.len(),
            request.street_radius,
            request.lat,
            request.lng
        );
        let run = self.start(streets, lookup, &request.weights, request.amenity_radius);
        Ok(drain(run, sink))
    }
}
