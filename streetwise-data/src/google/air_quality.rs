use geo::Coord;
use serde_json::{Value, json};
use streetwise_core::{AirQuality, AirQualityProvider, LookupError};

use super::GoogleMaps;
use super::responses::{AirQualityResponse, AqiIndex};
use crate::transport::{JsonTransport, decode};

const SERVICE: &str = "Google Air Quality";
const PREFERRED_INDEX: &str = "uaqi";
const FALLBACK_COLOR: &str = "#999999";
const UNKNOWN_CATEGORY: &str = "Unknown";

/// Render an RGB colour object with `0.0..=1.0` channels as `#RRGGBB`.
///
/// Missing channels count as zero. Values that are not objects render as
/// `#999999`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use streetwise_data::google::rgb_to_hex;
///
/// assert_eq!(rgb_to_hex(&json!({"red": 1.0, "green": 0.5})), "#FF7F00");
/// assert_eq!(rgb_to_hex(&json!("red")), "#999999");
/// ```
#[must_use]
pub fn rgb_to_hex(color: &Value) -> String {
    let Some(channels) = color.as_object() else {
        return FALLBACK_COLOR.to_owned();
    };
    let channel = |name: &str| channel_byte(channels.get(name).and_then(Value::as_f64));
    format!(
        "#{:02X}{:02X}{:02X}",
        channel("red"),
        channel("green"),
        channel("blue")
    )
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "channel fractions are clamped to 0..=255 before truncation"
)]
fn channel_byte(fraction: Option<f64>) -> u8 {
    (fraction.unwrap_or_default() * 255.0).clamp(0.0, 255.0) as u8
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "index values are small non-negative integers; truncation matches integer conversion"
)]
fn index_value(aqi: Option<f64>) -> u32 {
    aqi.unwrap_or_default().max(0.0) as u32
}

fn reading_from(index: &AqiIndex) -> AirQuality {
    let category = index
        .category
        .as_deref()
        .and_then(|label| label.split_whitespace().next())
        .unwrap_or(UNKNOWN_CATEGORY);
    let color = index
        .color
        .as_ref()
        .map_or_else(|| FALLBACK_COLOR.to_owned(), rgb_to_hex);
    AirQuality::reading(index_value(index.aqi), category, color)
}

impl<T: JsonTransport> GoogleMaps<T> {
    fn fetch_conditions(&self, location: Coord<f64>, key: &str) -> Result<AirQualityResponse, LookupError> {
        let body = json!({
            "location": {"latitude": location.y, "longitude": location.x}
        });
        let value = self.transport.post_json(
            &self.config.air_quality_url,
            &[("key", key.to_owned())],
            &body,
        )?;
        decode(value)
    }
}

impl<T: JsonTransport> AirQualityProvider for GoogleMaps<T> {
    /// Prefer the universal AQI index, falling back to the first index
    /// returned.
    fn current_conditions(&self, location: Coord<f64>) -> AirQuality {
        let Ok(key) = self.api_key(SERVICE) else {
            return AirQuality::missing_api_key();
        };
        let response = match self.fetch_conditions(location, key) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("air quality lookup failed: {err}");
                return AirQuality::fetch_failed();
            }
        };
        response
            .indexes
            .iter()
            .find(|index| index.code.eq_ignore_ascii_case(PREFERRED_INDEX))
            .or_else(|| response.indexes.first())
            .map_or_else(AirQuality::no_data, reading_from)
    }
}
