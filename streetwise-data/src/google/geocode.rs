use geo::Coord;
use streetwise_core::{GeocodeError, Geocoder};

use super::responses::GeocodeResponse;
use super::{GoogleMaps, ensure_ok};
use crate::transport::{JsonTransport, QueryParam};

const SERVICE: &str = "Google Geocoding";

impl<T: JsonTransport> Geocoder for GoogleMaps<T> {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        let key = self.api_key(SERVICE)?;
        let mut query: Vec<QueryParam> = vec![(
            "address",
            format!("{address}{}", self.config.address_suffix),
        )];
        if let Some(region) = &self.config.region {
            query.push(("region", region.clone()));
        }
        query.push(("key", key.to_owned()));

        let response: GeocodeResponse = self.get_maps("geocode/json", &query)?;
        let unresolvable = || GeocodeError::Unresolvable {
            address: address.to_owned(),
        };
        if response.status == "ZERO_RESULTS" {
            return Err(unresolvable());
        }
        ensure_ok(&response.status, response.error_message)?;
        let location = response
            .results
            .into_iter()
            .next()
            .and_then(|result| result.geometry.location)
            .ok_or_else(unresolvable)?;
        log::debug!("geocoded '{address}' to {},{}", location.lat, location.lng);
        Ok(Coord {
            x: location.lng,
            y: location.lat,
        })
    }
}
