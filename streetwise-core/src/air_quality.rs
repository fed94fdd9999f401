//! Air-quality readings.

/// Category label reported when no API key is configured.
pub const API_KEY_MISSING: &str = "API key missing";
/// Category label reported when the service returned no index.
pub const NO_DATA: &str = "No data";
/// Category label reported when the request failed.
pub const FETCH_FAILED: &str = "Error fetching AQI";

/// Current air-quality index at a location.
///
/// A reading without an index carries one of the sentinel labels
/// [`API_KEY_MISSING`], [`NO_DATA`] or [`FETCH_FAILED`] instead.
///
/// # Examples
/// ```
/// use streetwise_core::AirQuality;
///
/// let reading = AirQuality::missing_api_key();
/// assert!(reading.aqi.is_none());
/// assert_eq!(reading.category, "API key missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirQuality {
    /// Index value, when available.
    pub aqi: Option<u32>,
    /// Short category label such as `"Good"`, or a sentinel.
    pub category: String,
    /// Display colour as `#RRGGBB`, when available.
    pub color: Option<String>,
}

impl AirQuality {
    /// A successful reading.
    #[must_use]
    pub fn reading(aqi: u32, category: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            aqi: Some(aqi),
            category: category.into(),
            color: Some(color.into()),
        }
    }

    /// Reading returned when no credential is configured.
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::sentinel(API_KEY_MISSING)
    }

    /// Reading returned when the service has no index for the location.
    #[must_use]
    pub fn no_data() -> Self {
        Self::sentinel(NO_DATA)
    }

    /// Reading returned when the request failed.
    #[must_use]
    pub fn fetch_failed() -> Self {
        Self::sentinel(FETCH_FAILED)
    }

    /// Report whether this reading carries an index value.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.aqi.is_some()
    }

    fn sentinel(label: &str) -> Self {
        Self {
            aqi: None,
            category: label.to_owned(),
            color: None,
        }
    }
}
