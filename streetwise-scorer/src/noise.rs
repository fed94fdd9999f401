//! Noise estimation from amenity density.
//!
//! Places are grouped into noise buckets, each with a weight describing how
//! loud that kind of place is. Categories outside every bucket use the
//! table's fallback weight. The weighted place count is divided by a fixed
//! ceiling (the bucket weights summed, times a nominal number of places per
//! category) rather than by anything observed in the data, and then placed on
//! a ten-point scale.

use streetwise_core::{AmenityCategory, AmenityMap, NoiseEstimator, NoiseLabel};
use thiserror::Error;

use crate::{count_to_f64, round_hundredths};

/// Weight applied to categories that belong to no bucket.
pub const DEFAULT_FALLBACK_WEIGHT: f64 = 1.0;
/// Nominal number of places per category assumed by the ceiling.
pub const DEFAULT_PLACES_PER_CATEGORY: u32 = 10;

/// A named group of categories sharing one noise weight.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseBucket {
    /// Bucket name, for diagnostics.
    pub label: String,
    /// Noise contributed by each place in the bucket.
    pub weight: f64,
    /// Categories belonging to the bucket.
    pub categories: Vec<AmenityCategory>,
}

impl NoiseBucket {
    /// Construct a bucket.
    #[must_use]
    pub fn new(label: impl Into<String>, weight: f64, categories: &[AmenityCategory]) -> Self {
        Self {
            label: label.into(),
            weight,
            categories: categories.to_vec(),
        }
    }
}

/// Errors returned by [`NoiseTable::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseTableError {
    /// A weight was negative or not finite.
    #[error("noise weight {weight} for '{label}' must be finite and non-negative")]
    InvalidWeight {
        /// Bucket label, or `"fallback"`.
        label: String,
        /// The rejected weight.
        weight: f64,
    },
    /// A category belonged to more than one bucket.
    #[error("category '{category}' appears in more than one noise bucket")]
    OverlappingBuckets {
        /// The repeated category.
        category: AmenityCategory,
    },
    /// The normalisation ceiling would be zero.
    #[error("noise ceiling must be positive")]
    ZeroCeiling,
}

/// Noise weights per category plus the normalisation ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseTable {
    buckets: Vec<NoiseBucket>,
    fallback_weight: f64,
    places_per_category: u32,
}

impl NoiseTable {
    /// Validate and construct a table.
    ///
    /// # Errors
    /// Returns [`NoiseTableError`] for negative or non-finite weights, a
    /// category listed in two buckets, or a ceiling of zero.
    pub fn new(
        buckets: Vec<NoiseBucket>,
        fallback_weight: f64,
        places_per_category: u32,
    ) -> Result<Self, NoiseTableError> {
        let invalid = |weight: f64| !(weight.is_finite() && weight >= 0.0);
        if invalid(fallback_weight) {
            return Err(NoiseTableError::InvalidWeight {
                label: "fallback".to_owned(),
                weight: fallback_weight,
            });
        }
        if let Some(bucket) = buckets.iter().find(|bucket| invalid(bucket.weight)) {
            return Err(NoiseTableError::InvalidWeight {
                label: bucket.label.clone(),
                weight: bucket.weight,
            });
        }
        let mut seen = Vec::new();
        for category in buckets.iter().flat_map(|bucket| bucket.categories.iter()) {
            if seen.contains(category) {
                return Err(NoiseTableError::OverlappingBuckets {
                    category: *category,
                });
            }
            seen.push(*category);
        }
        let table = Self {
            buckets,
            fallback_weight,
            places_per_category,
        };
        if table.ceiling() <= 0.0 {
            return Err(NoiseTableError::ZeroCeiling);
        }
        Ok(table)
    }

    /// The standard six-bucket table.
    ///
    /// | Bucket | Weight | Categories |
    /// |--------|--------|------------|
    /// | Transports | 3.0 | Bus Stand, Junction |
    /// | Shops | 2.0 | Shops |
    /// | Entertainment | 2.5 | Entertainment |
    /// | Restaurants | 1.5 | Restaurant |
    /// | Shrines | 0.5 | Shrine |
    /// | Parks | 0.3 | Park |
    ///
    /// Every other category weighs [`DEFAULT_FALLBACK_WEIGHT`], and the
    /// ceiling assumes [`DEFAULT_PLACES_PER_CATEGORY`] places per bucket.
    #[must_use]
    pub fn standard() -> Self {
        use AmenityCategory as C;
        Self {
            buckets: vec![
                NoiseBucket::new("Transports", 3.0, &[C::BusStand, C::Junction]),
                NoiseBucket::new("Shops", 2.0, &[C::Shops]),
                NoiseBucket::new("Entertainment", 2.5, &[C::Entertainment]),
                NoiseBucket::new("Restaurants", 1.5, &[C::Restaurant]),
                NoiseBucket::new("Shrines", 0.5, &[C::Shrine]),
                NoiseBucket::new("Parks", 0.3, &[C::Park]),
            ],
            fallback_weight: DEFAULT_FALLBACK_WEIGHT,
            places_per_category: DEFAULT_PLACES_PER_CATEGORY,
        }
    }

    /// Noise weight of one place in `category`.
    #[must_use]
    pub fn weight_for(&self, category: AmenityCategory) -> f64 {
        self.buckets
            .iter()
            .find(|bucket| bucket.categories.contains(&category))
            .map_or(self.fallback_weight, |bucket| bucket.weight)
    }

    /// Fixed normalisation ceiling: the bucket weights summed, times the
    /// nominal places per category.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "ceiling scales the bucket weight total"
    )]
    pub fn ceiling(&self) -> f64 {
        let total: f64 = self.buckets.iter().map(|bucket| bucket.weight).sum();
        total * f64::from(self.places_per_category)
    }

    /// Buckets in declaration order.
    #[must_use]
    pub fn buckets(&self) -> &[NoiseBucket] {
        &self.buckets
    }
}

impl Default for NoiseTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Estimate noise by weighting amenity counts with a [`NoiseTable`].
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityCategory, NoiseEstimator, NoiseLabel};
/// use streetwise_core::test_support::amenity_map;
/// use streetwise_scorer::WeightedNoiseEstimator;
///
/// let estimator = WeightedNoiseEstimator::default();
/// let busy = amenity_map(&[
///     (AmenityCategory::BusStand, 10),
///     (AmenityCategory::Shops, 10),
///     (AmenityCategory::Entertainment, 10),
///     (AmenityCategory::Restaurant, 10),
/// ]);
/// assert_eq!(estimator.noise_score(&busy), 9.18);
/// assert_eq!(estimator.estimate(&busy), NoiseLabel::High);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightedNoiseEstimator {
    table: NoiseTable,
}

impl WeightedNoiseEstimator {
    /// Construct an estimator over `table`.
    #[must_use]
    pub const fn new(table: NoiseTable) -> Self {
        Self { table }
    }

    /// The table in use.
    #[must_use]
    pub const fn table(&self) -> &NoiseTable {
        &self.table
    }

    /// Noise on a `0.0..=10.0`-nominal scale, rounded to two decimals.
    ///
    /// The value can exceed ten when a street has more places than the
    /// ceiling assumes.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "weighted counts are normalised against the fixed ceiling"
    )]
    pub fn noise_score(&self, amenities: &AmenityMap) -> f64 {
        let total: f64 = amenities
            .iter()
            .map(|(category, places)| self.table.weight_for(category) * count_to_f64(places.len()))
            .sum();
        round_hundredths(total / self.table.ceiling() * 10.0)
    }
}

impl NoiseEstimator for WeightedNoiseEstimator {
    fn estimate(&self, amenities: &AmenityMap) -> NoiseLabel {
        NoiseLabel::from_score(self.noise_score(amenities))
    }
}
