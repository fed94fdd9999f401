//! Address survey: position plus current air quality.

use serde::{Deserialize, Serialize};
use streetwise_core::{AirQualityProvider, GeocodeError, Geocoder};

/// Position and air quality of a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Address as supplied by the caller.
    pub address: String,
    /// Resolved latitude in degrees.
    pub lat: f64,
    /// Resolved longitude in degrees.
    pub lng: f64,
    /// Air-quality index, when available.
    pub aqi: Option<u32>,
    /// Air-quality category label or sentinel.
    pub aqi_desc: String,
    /// Display colour as `#RRGGBB`, when available.
    pub aqi_color: Option<String>,
}

/// Geocode `address` and fetch the air quality at the result.
///
/// A blank address is rejected without contacting the geocoder. Air-quality
/// failures never fail the survey; they surface as sentinel labels.
///
/// # Errors
/// Returns [`GeocodeError`] when the address is blank or cannot be resolved.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use streetwise_core::AirQuality;
/// use streetwise_core::test_support::{FixedAirQuality, StubGeocoder};
/// use streetwise_ranker::survey;
///
/// let geocoder = StubGeocoder::default().with_address("T Nagar", Coord { x: 80.23, y: 13.04 });
/// let air = FixedAirQuality(AirQuality::reading(42, "Good", "#00e400"));
///
/// let report = survey("T Nagar", &geocoder, &air)?;
/// assert_eq!(report.lat, 13.04);
/// assert_eq!(report.aqi, Some(42));
/// # Ok::<(), streetwise_core::GeocodeError>(())
/// ```
pub fn survey<G, Q>(address: &str, geocoder: &G, air: &Q) -> Result<SearchReport, GeocodeError>
where
    G: Geocoder + ?Sized,
    Q: AirQualityProvider + ?Sized,
{
    if address.trim().is_empty() {
        return Err(GeocodeError::Unresolvable {
            address: address.to_owned(),
        });
    }
    let location = geocoder.geocode(address)?;
    let reading = air.current_conditions(location);
    if !reading.is_available() {
        log::warn!("no air quality for '{address}': {}", reading.category);
    }
    Ok(SearchReport {
        address: address.to_owned(),
        lat: location.y,
        lng: location.x,
        aqi: reading.aqi,
        aqi_desc: reading.category,
        aqi_color: reading.color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use streetwise_core::AirQuality;
    use streetwise_core::test_support::{FixedAirQuality, StubGeocoder};

    #[fixture]
    fn geocoder() -> StubGeocoder {
        StubGeocoder::default().with_address("Koramangala", Coord { x: 77.62, y: 12.93 })
    }

    #[rstest]
    fn reports_position_and_reading(geocoder: StubGeocoder) {
        let air = FixedAirQuality(AirQuality::reading(87, "Moderate", "#ffff00"));
        let report = survey("Koramangala", &geocoder, &air).expect("resolvable");
        assert_eq!(
            report,
            SearchReport {
                address: "Koramangala".to_owned(),
                lat: 12.93,
                lng: 77.62,
                aqi: Some(87),
                aqi_desc: "Moderate".to_owned(),
                aqi_color: Some("#ffff00".to_owned()),
            }
        );
    }

    #[rstest]
    fn missing_key_sentinel_is_not_an_error(geocoder: StubGeocoder) {
        let air = FixedAirQuality(AirQuality::missing_api_key());
        let report = survey("Koramangala", &geocoder, &air).expect("resolvable");
        assert_eq!(report.aqi, None);
        assert_eq!(report.aqi_desc, "API key missing");
        assert_eq!(report.aqi_color, None);
    }

    #[rstest]
    #[case("Atlantis")]
    #[case("   ")]
    fn unresolvable_addresses_fail(geocoder: StubGeocoder, #[case] address: &str) {
        let air = FixedAirQuality(AirQuality::no_data());
        let err = survey(address, &geocoder, &air).expect_err("unresolvable");
        assert!(matches!(err, GeocodeError::Unresolvable { .. }));
    }

    #[rstest]
    fn serialises_wire_fields(geocoder: StubGeocoder) {
        let air = FixedAirQuality(AirQuality::no_data());
        let report = survey("Koramangala", &geocoder, &air).expect("resolvable");
        let json = serde_json::to_value(&report).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "address": "Koramangala",
                "lat": 12.93,
                "lng": 77.62,
                "aqi": null,
                "aqi_desc": "No data",
                "aqi_color": null
            })
        );
    }
}
