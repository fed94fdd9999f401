//! Streets considered for ranking and their scored form.

use geo::Coord;

use crate::{AmenityMap, NoiseLabel};

/// Decimal places kept when comparing street coordinates.
pub const KEY_COORDINATE_PRECISION: i32 = 6;

/// A named street position produced by street discovery.
///
/// Names are not unique: the same name may label several distinct streets.
/// Identity is the [`StreetKey`].
///
/// # Examples
/// ```
/// use streetwise_core::StreetCandidate;
///
/// let a = StreetCandidate::new("MG Road", 12.975_000_1, 77.606);
/// let b = StreetCandidate::new("MG Road", 12.975_000_4, 77.606);
/// assert_eq!(a.key(), b.key());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreetCandidate {
    /// Street name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl StreetCandidate {
    /// Construct a candidate.
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Identity of this street for deduplication.
    #[must_use]
    pub fn key(&self) -> StreetKey {
        StreetKey {
            name: self.name.clone(),
            latitude: quantise(self.latitude),
            longitude: quantise(self.longitude),
        }
    }
}

/// Street identity: the name plus both coordinates rounded to
/// [`KEY_COORDINATE_PRECISION`] decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreetKey {
    name: String,
    latitude: i64,
    longitude: i64,
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "coordinates are scaled to integer micro-degrees for hashing"
)]
fn quantise(degrees: f64) -> i64 {
    (degrees * 10_f64.powi(KEY_COORDINATE_PRECISION)).round() as i64
}

/// A street with its livability score, noise estimate and amenities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredStreet {
    /// The street that was scored.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub street: StreetCandidate,
    /// Score in `0.0..=10.0`, rounded to two decimals.
    pub score: f64,
    /// Qualitative noise estimate.
    pub noise: NoiseLabel,
    /// Amenities found around the street.
    pub amenities: AmenityMap,
}
