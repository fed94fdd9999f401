//! Scoring for Streetwise streets.
//!
//! The crate provides the two reductions applied to every street's amenities:
//! - **Livability scoring** with [`TopsisScorer`], a closeness-to-ideal method
//!   over per-category amenity counts weighted by the caller's preferences.
//!   It implements [`StreetScorer`](streetwise_core::StreetScorer).
//! - **Noise estimation** with [`WeightedNoiseEstimator`], which weighs
//!   amenity counts by how much noise each kind of place generates and maps
//!   the result onto a [`NoiseLabel`](streetwise_core::NoiseLabel). It
//!   implements [`NoiseEstimator`](streetwise_core::NoiseEstimator).
//!
//! # Examples
//!
//! ```
//! use streetwise_core::{AmenityCategory, AmenityMap, AmenityRecord, NoiseEstimator,
//!     NoiseLabel, StreetScorer, WeightVector};
//! use streetwise_scorer::{TopsisScorer, WeightedNoiseEstimator};
//!
//! let amenities = AmenityMap::new()
//!     .with_place(AmenityCategory::Hospital, AmenityRecord::new("General", 0.0, 0.0));
//!
//! let score = TopsisScorer::default().score(&amenities, &WeightVector::new());
//! assert_eq!(score, 2.24);
//! assert_eq!(WeightedNoiseEstimator::default().estimate(&amenities), NoiseLabel::Low);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod noise;
mod topsis;

pub use noise::{
    DEFAULT_FALLBACK_WEIGHT, DEFAULT_PLACES_PER_CATEGORY, NoiseBucket, NoiseTable, NoiseTableError,
    WeightedNoiseEstimator,
};
pub use topsis::TopsisScorer;

/// Round to two decimal places, halves away from zero.
#[expect(
    clippy::float_arithmetic,
    reason = "scores are reported with two-decimal precision"
)]
pub(crate) fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a place count to `f64` without a lossy cast.
pub(crate) fn count_to_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}
