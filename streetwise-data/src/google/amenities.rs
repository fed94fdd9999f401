use std::collections::HashSet;

use geo::{Distance, Geodesic, Point};
use streetwise_core::{
    AmenityLookup, AmenityMap, AmenityRecord, LookupError, StreetCandidate,
};

use super::GoogleMaps;
use super::places::PLACES_SERVICE;
use super::responses::{DetailsResponse, PlaceDetails};
use crate::transport::JsonTransport;

const DETAILS_PATH: &str = "place/details/json";
const PHOTO_PATH: &str = "place/photo";
const DETAIL_FIELDS: &str =
    "name,rating,user_ratings_total,formatted_address,geometry,opening_hours,photos";

impl<T: JsonTransport> GoogleMaps<T> {
    fn place_details(&self, place_id: &str, key: &str) -> Result<Option<PlaceDetails>, LookupError> {
        let query = [
            ("place_id", place_id.to_owned()),
            ("fields", DETAIL_FIELDS.to_owned()),
            ("key", key.to_owned()),
        ];
        let response: DetailsResponse = self.get_maps(DETAILS_PATH, &query)?;
        Ok(response.result)
    }

    fn photo_url(&self, reference: &str, key: &str) -> Option<String> {
        let endpoint = self.maps_endpoint(PHOTO_PATH);
        url::Url::parse_with_params(
            &endpoint,
            [
                ("maxwidth", self.config.photo_max_width.to_string().as_str()),
                ("photoreference", reference),
                ("key", key),
            ],
        )
        .ok()
        .map(String::from)
    }

    fn amenity_record(
        &self,
        street: &StreetCandidate,
        details: PlaceDetails,
        key: &str,
    ) -> Option<AmenityRecord> {
        let location = details.geometry.location?;
        let photos = details
            .photos
            .iter()
            .filter_map(|photo| photo.photo_reference.as_deref())
            .filter_map(|reference| self.photo_url(reference, key))
            .collect();
        Some(AmenityRecord {
            name: details.name.unwrap_or_default(),
            rating: details.rating.unwrap_or_default(),
            reviews: details.user_ratings_total.unwrap_or_default(),
            distance: distance_m(street, location.lat, location.lng),
            address: details.formatted_address.unwrap_or_default(),
            open_now: details.opening_hours.and_then(|hours| hours.open_now),
            lat: location.lat,
            lng: location.lng,
            photos,
        })
    }
}

/// Whole meters between the street point and a place, truncated.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "geodesic distances are non-negative and far below u32::MAX meters"
)]
fn distance_m(street: &StreetCandidate, lat: f64, lng: f64) -> u32 {
    let from = Point::new(street.longitude, street.latitude);
    let to = Point::new(lng, lat);
    Geodesic.distance(from, to) as u32
}

impl<T: JsonTransport> AmenityLookup for GoogleMaps<T> {
    /// Search each catalog place type around `street` and describe every
    /// hit with its place details.
    ///
    /// Failed searches and failed detail requests are logged and skipped.
    /// A place listed under several types of one category is kept once.
    /// The lookup only fails when no API key is configured or every search
    /// failed.
    fn lookup_amenities(
        &self,
        street: &StreetCandidate,
        radius_m: u32,
    ) -> Result<AmenityMap, LookupError> {
        let key = self.api_key(PLACES_SERVICE)?;
        let mut amenities = AmenityMap::new();
        let mut first_error = None;
        let mut any_search_succeeded = false;

        for entry in self.catalog.entries() {
            let mut seen = HashSet::new();
            let mut records = Vec::new();
            for place_type in &entry.place_types {
                let places =
                    match self.nearby_search(street.location(), radius_m, Some(place_type)) {
                        Ok(places) => places,
                        Err(err) => {
                            log::warn!(
                                "{} search for '{}' failed: {err}",
                                place_type,
                                street.name
                            );
                            first_error.get_or_insert(err);
                            continue;
                        }
                    };
                any_search_succeeded = true;
                for place_id in places.into_iter().filter_map(|place| place.place_id) {
                    if !seen.insert(place_id.clone()) {
                        continue;
                    }
                    match self.place_details(&place_id, key) {
                        Ok(Some(details)) => {
                            records.extend(self.amenity_record(street, details, key));
                        }
                        Ok(None) => log::debug!("no details for place {place_id}"),
                        Err(err) => log::warn!("details for place {place_id} failed: {err}"),
                    }
                }
            }
            amenities.insert(entry.category, records);
        }

        match first_error {
            Some(err) if !any_search_succeeded => Err(err),
            _ => Ok(amenities),
        }
    }
}
