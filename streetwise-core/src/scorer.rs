//! Score streets from their surrounding amenities.
//!
//! The `StreetScorer` trait turns an [`AmenityMap`](crate::AmenityMap) and a
//! caller's [`WeightVector`](crate::WeightVector) into one comparable number.

use crate::{AmenityMap, WeightVector};

/// Upper bound of the score scale.
pub const MAX_STREET_SCORE: f64 = 10.0;

/// Calculate a livability score for one street.
///
/// Higher scores indicate a better match between the street's amenities and
/// the caller's weights. Implementations must be thread-safe (`Send` + `Sync`).
/// The method is infallible; implementers must return `0.0` when no amenity
/// falls into a weighted category.
///
/// Implementations must:
/// - Produce finite scores.
/// - Return values in `0.0..=10.0`.
///
/// Use [`StreetScorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use streetwise_core::{AmenityMap, StreetScorer, WeightVector};
///
/// struct CountScorer;
///
/// impl StreetScorer for CountScorer {
///     fn score(&self, amenities: &AmenityMap, _weights: &WeightVector) -> f64 {
///         Self::sanitise(amenities.total_places() as f64)
///     }
/// }
///
/// assert_eq!(CountScorer.score(&AmenityMap::new(), &WeightVector::new()), 0.0);
/// ```
pub trait StreetScorer: Send + Sync {
    /// Return a score for `amenities` according to `weights`.
    fn score(&self, amenities: &AmenityMap, weights: &WeightVector) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=10.0`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, MAX_STREET_SCORE)
    }
}
