//! Deterministic collaborator doubles used by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::HashMap;

use geo::Coord;

use crate::{
    AirQuality, AirQualityProvider, AmenityCategory, AmenityLookup, AmenityMap, AmenityRecord,
    GeocodeError, Geocoder, LookupError, StreetCandidate, StreetSource,
};

/// Build an amenity map holding `count` placeholder places per category.
///
/// # Examples
/// ```
/// use streetwise_core::AmenityCategory;
/// use streetwise_core::test_support::amenity_map;
///
/// let map = amenity_map(&[(AmenityCategory::Park, 2)]);
/// assert_eq!(map.count(AmenityCategory::Park), 2);
/// ```
#[must_use]
pub fn amenity_map(counts: &[(AmenityCategory, usize)]) -> AmenityMap {
    counts
        .iter()
        .map(|&(category, count)| {
            let places = (0..count)
                .map(|index| AmenityRecord::new(format!("{category} {index}"), 0.0, 0.0))
                .collect();
            (category, places)
        })
        .collect()
}

/// `AmenityLookup` answering from a table keyed by street name.
///
/// Streets missing from the table yield an empty map. Every call is recorded
/// so tests can assert on lookup order.
#[derive(Debug, Default)]
pub struct StubAmenityLookup {
    responses: HashMap<String, Result<AmenityMap, LookupError>>,
    calls: RefCell<Vec<String>>,
}

impl StubAmenityLookup {
    /// Create a lookup that finds nothing anywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups for `street` with `amenities`.
    #[must_use]
    pub fn with_amenities(mut self, street: impl Into<String>, amenities: AmenityMap) -> Self {
        self.responses.insert(street.into(), Ok(amenities));
        self
    }

    /// Fail lookups for `street` with `error`.
    #[must_use]
    pub fn with_error(mut self, street: impl Into<String>, error: LookupError) -> Self {
        self.responses.insert(street.into(), Err(error));
        self
    }

    /// Street names looked up so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl AmenityLookup for StubAmenityLookup {
    fn lookup_amenities(
        &self,
        street: &StreetCandidate,
        _radius_m: u32,
    ) -> Result<AmenityMap, LookupError> {
        self.calls.borrow_mut().push(street.name.clone());
        self.responses
            .get(&street.name)
            .cloned()
            .unwrap_or_else(|| Ok(AmenityMap::new()))
    }
}

/// `StreetSource` returning a fixed response.
#[derive(Debug, Clone)]
pub struct StubStreetSource {
    name: String,
    response: Result<Vec<StreetCandidate>, LookupError>,
}

impl StubStreetSource {
    /// A source returning `streets`.
    #[must_use]
    pub fn with_streets(name: impl Into<String>, streets: Vec<StreetCandidate>) -> Self {
        Self {
            name: name.into(),
            response: Ok(streets),
        }
    }

    /// A source failing with `error`.
    #[must_use]
    pub fn with_error(name: impl Into<String>, error: LookupError) -> Self {
        Self {
            name: name.into(),
            response: Err(error),
        }
    }
}

impl StreetSource for StubStreetSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn streets_near(
        &self,
        _center: Coord<f64>,
        _radius_m: u32,
    ) -> Result<Vec<StreetCandidate>, LookupError> {
        self.response.clone()
    }
}

/// `Geocoder` resolving only the addresses it was given.
#[derive(Debug, Clone, Default)]
pub struct StubGeocoder {
    known: HashMap<String, Coord<f64>>,
}

impl StubGeocoder {
    /// Resolve `address` to `location`.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>, location: Coord<f64>) -> Self {
        self.known.insert(address.into(), location);
        self
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        self.known
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::Unresolvable {
                address: address.to_owned(),
            })
    }
}

/// `AirQualityProvider` returning the same reading everywhere.
#[derive(Debug, Clone)]
pub struct FixedAirQuality(pub AirQuality);

impl AirQualityProvider for FixedAirQuality {
    fn current_conditions(&self, _location: Coord<f64>) -> AirQuality {
        self.0.clone()
    }
}
