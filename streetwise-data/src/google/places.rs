use std::collections::HashSet;

use geo::Coord;
use streetwise_core::{LookupError, StreetCandidate, StreetSource};

use super::responses::{NearbyPlace, NearbyResponse};
use super::{GoogleMaps, ensure_ok};
use crate::transport::{JsonTransport, QueryParam};

pub(super) const PLACES_SERVICE: &str = "Google Places";
pub(super) const NEARBY_SEARCH_PATH: &str = "place/nearbysearch/json";

/// Substrings that mark an address component as a street name.
const STREET_MARKERS: [&str; 5] = ["Street", "St", "Nagar", "Theru", "Ave"];

/// Pick the street name out of a comma-separated vicinity string.
///
/// Returns the first trimmed component containing one of the street markers
/// (`Street`, `St`, `Nagar`, `Theru`, `Ave`). Matching is a case-sensitive
/// substring test.
///
/// # Examples
/// ```
/// use streetwise_data::google::clean_street_name;
///
/// assert_eq!(
///     clean_street_name("12, Gandhi Nagar, Adyar"),
///     Some("Gandhi Nagar".to_owned())
/// );
/// assert_eq!(clean_street_name("Adyar, Chennai"), None);
/// ```
#[must_use]
pub fn clean_street_name(vicinity: &str) -> Option<String> {
    vicinity
        .split(',')
        .map(str::trim)
        .find(|part| STREET_MARKERS.iter().any(|marker| part.contains(marker)))
        .map(str::to_owned)
}

impl<T: JsonTransport> GoogleMaps<T> {
    pub(super) fn nearby_search(
        &self,
        center: Coord<f64>,
        radius_m: u32,
        place_type: Option<&str>,
    ) -> Result<Vec<NearbyPlace>, LookupError> {
        let key = self.api_key(PLACES_SERVICE)?;
        let mut query: Vec<QueryParam> = vec![
            ("location", format!("{},{}", center.y, center.x)),
            ("radius", radius_m.to_string()),
        ];
        if let Some(kind) = place_type {
            query.push(("type", kind.to_owned()));
        }
        query.push(("key", key.to_owned()));
        let response: NearbyResponse = self.get_maps(NEARBY_SEARCH_PATH, &query)?;
        ensure_ok(&response.status, response.error_message)?;
        Ok(response.results)
    }
}

impl<T: JsonTransport> StreetSource for GoogleMaps<T> {
    fn source_name(&self) -> &str {
        PLACES_SERVICE
    }

    fn streets_near(
        &self,
        center: Coord<f64>,
        radius_m: u32,
    ) -> Result<Vec<StreetCandidate>, LookupError> {
        let places = self.nearby_search(center, radius_m, None)?;
        let mut seen = HashSet::new();
        let streets: Vec<StreetCandidate> = places
            .into_iter()
            .filter_map(|place| {
                let name = clean_street_name(place.vicinity.as_deref()?)?;
                let location = place.geometry.location?;
                Some(StreetCandidate::new(name, location.lat, location.lng))
            })
            .filter(|street| seen.insert(street.name.clone()))
            .collect();
        log::debug!("places search found {} streets", streets.len());
        Ok(streets)
    }
}
