//! Wire types for the Maps and Air Quality APIs.
//!
//! Only the fields the clients read are modelled; everything else in the
//! payloads is ignored.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct LatLng {
    pub(super) lat: f64,
    pub(super) lng: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Geometry {
    pub(super) location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResponse {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<GeocodeResult>,
    pub(super) error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeResult {
    #[serde(default)]
    pub(super) geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(super) struct NearbyResponse {
    pub(super) status: String,
    #[serde(default)]
    pub(super) results: Vec<NearbyPlace>,
    pub(super) error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NearbyPlace {
    pub(super) place_id: Option<String>,
    pub(super) vicinity: Option<String>,
    #[serde(default)]
    pub(super) geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailsResponse {
    pub(super) result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaceDetails {
    pub(super) name: Option<String>,
    pub(super) rating: Option<f64>,
    pub(super) user_ratings_total: Option<u32>,
    pub(super) formatted_address: Option<String>,
    #[serde(default)]
    pub(super) geometry: Geometry,
    pub(super) opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub(super) photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpeningHours {
    pub(super) open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Photo {
    pub(super) photo_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AirQualityResponse {
    #[serde(default)]
    pub(super) indexes: Vec<AqiIndex>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AqiIndex {
    #[serde(default)]
    pub(super) code: String,
    pub(super) aqi: Option<f64>,
    pub(super) category: Option<String>,
    /// Kept untyped: a colour that is not an object maps to a fallback.
    pub(super) color: Option<Value>,
}
