//! Closeness-to-ideal street scoring.
//!
//! Each weighted category contributes one dimension: the number of places
//! found in that category. The count vector is normalised by its Euclidean
//! norm and multiplied by the weights. The best and worst reference points
//! are the largest and smallest weighted components of that single vector,
//! not per-dimension ideals across several alternatives, so every street is
//! scored on its own without reference to the others.

use streetwise_core::{AmenityCatalog, AmenityMap, MAX_STREET_SCORE, StreetScorer, WeightVector};

use crate::{count_to_f64, round_hundredths};

/// Score streets by how close their weighted amenity profile sits to its own
/// best component.
///
/// Custom weight vectors are completed with the scorer's defaults (see
/// [`WeightVector::resolved_with`]), so every default category always takes
/// part in the calculation, including those with no places.
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityCategory, StreetScorer, WeightVector};
/// use streetwise_core::test_support::amenity_map;
/// use streetwise_scorer::TopsisScorer;
///
/// let amenities = amenity_map(&[(AmenityCategory::Hospital, 1), (AmenityCategory::Park, 2)]);
/// let score = TopsisScorer::default().score(&amenities, &WeightVector::new());
/// assert_eq!(score, 2.6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TopsisScorer {
    defaults: WeightVector,
}

impl TopsisScorer {
    /// Construct a scorer completing custom weights with `defaults`.
    #[must_use]
    pub const fn new(defaults: WeightVector) -> Self {
        Self { defaults }
    }

    /// Construct a scorer using a catalog's default weights.
    #[must_use]
    pub fn from_catalog(catalog: &AmenityCatalog) -> Self {
        Self::new(catalog.default_weights())
    }

    /// Default weights applied to categories a caller leaves out.
    #[must_use]
    pub const fn defaults(&self) -> &WeightVector {
        &self.defaults
    }
}

impl Default for TopsisScorer {
    fn default() -> Self {
        Self::from_catalog(&AmenityCatalog::standard())
    }
}

impl StreetScorer for TopsisScorer {
    #[expect(
        clippy::float_arithmetic,
        reason = "the closeness ratio is scaled onto the ten-point score range"
    )]
    fn score(&self, amenities: &AmenityMap, weights: &WeightVector) -> f64 {
        let resolved = weights.resolved_with(&self.defaults);
        let (counts, importance): (Vec<f64>, Vec<f64>) = resolved
            .iter()
            .map(|(category, weight)| (count_to_f64(amenities.count(category)), weight))
            .unzip();

        let Some(ratio) = closeness_ratio(&counts, &importance) else {
            log::trace!("no amenities in any weighted category; scoring 0.0");
            return 0.0;
        };
        Self::sanitise(round_hundredths(ratio * MAX_STREET_SCORE))
    }
}

/// Relative closeness of the weighted profile to its worst component.
///
/// Returns `None` when every count is zero. Returns `Some(0.0)` when all
/// weighted components coincide.
#[expect(
    clippy::float_arithmetic,
    reason = "vector normalisation and distances require floating-point maths"
)]
fn closeness_ratio(counts: &[f64], weights: &[f64]) -> Option<f64> {
    let norm = euclidean_norm(counts.iter().copied());
    if norm == 0.0 {
        return None;
    }

    let weighted: Vec<f64> = counts
        .iter()
        .zip(weights)
        .map(|(count, weight)| count / norm * weight)
        .collect();
    let best = weighted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let worst = weighted.iter().copied().fold(f64::INFINITY, f64::min);

    let to_best = euclidean_norm(weighted.iter().map(|value| value - best));
    let to_worst = euclidean_norm(weighted.iter().map(|value| value - worst));
    let spread = to_best + to_worst;
    if spread == 0.0 {
        return Some(0.0);
    }
    Some(to_worst / spread)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean norm squares and sums components"
)]
fn euclidean_norm(components: impl Iterator<Item = f64>) -> f64 {
    components.map(|value| value * value).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use streetwise_core::AmenityCategory as C;
    use streetwise_core::test_support::amenity_map;

    #[fixture]
    fn scorer() -> TopsisScorer {
        TopsisScorer::default()
    }

    #[rstest]
    #[case::hospital_and_parks(&[(C::Hospital, 1), (C::Park, 2)], 2.6)]
    #[case::more_hospitals(&[(C::Hospital, 2), (C::Park, 2)], 2.36)]
    #[case::more_parks(&[(C::Hospital, 1), (C::Park, 4)], 2.79)]
    #[case::single_category(&[(C::Bank, 3)], 2.24)]
    #[case::every_category_once(&C::ALL.map(|category| (category, 1)), 5.0)]
    #[case::mixed(&[(C::Park, 5), (C::Shops, 3), (C::Restaurant, 7)], 2.63)]
    fn default_weight_scores(
        scorer: TopsisScorer,
        #[case] counts: &[(C, usize)],
        #[case] expected: f64,
    ) {
        let score = scorer.score(&amenity_map(counts), &WeightVector::new());
        assert_eq!(score, expected);
    }

    #[rstest]
    fn empty_map_scores_zero(scorer: TopsisScorer) {
        assert_eq!(scorer.score(&AmenityMap::new(), &WeightVector::new()), 0.0);
    }

    #[rstest]
    fn amenities_outside_weighted_categories_score_zero() {
        let defaults = WeightVector::from_preferences(&[C::Hospital, C::School]);
        let scorer = TopsisScorer::new(defaults);
        let amenities = amenity_map(&[(C::Park, 4), (C::Gym, 2)]);
        assert_eq!(scorer.score(&amenities, &WeightVector::new()), 0.0);
    }

    #[rstest]
    fn partial_custom_weights_fall_back_to_defaults(scorer: TopsisScorer) {
        let amenities = amenity_map(&[(C::Hospital, 1), (C::Park, 2)]);
        let custom = WeightVector::new()
            .with_weight(C::Park, 2.0)
            .and_then(|weights| weights.with_weight(C::Gym, 1.0))
            .expect("valid weights");
        assert_eq!(scorer.score(&amenities, &custom), 2.36);
    }

    #[rstest]
    fn identical_weighted_components_score_zero() {
        let defaults = WeightVector::from_preferences(&[C::Park]);
        let scorer = TopsisScorer::new(defaults);
        let amenities = amenity_map(&[(C::Park, 3)]);
        assert_eq!(scorer.score(&amenities, &WeightVector::new()), 0.0);
    }

    #[rstest]
    fn doubling_one_category_changes_the_score(scorer: TopsisScorer) {
        let base = scorer.score(
            &amenity_map(&[(C::Hospital, 1), (C::Park, 2)]),
            &WeightVector::new(),
        );
        let doubled = scorer.score(
            &amenity_map(&[(C::Hospital, 2), (C::Park, 2)]),
            &WeightVector::new(),
        );
        assert_ne!(base, doubled);
    }

    #[rstest]
    fn absent_and_empty_categories_score_alike(scorer: TopsisScorer) {
        let mut with_empty = amenity_map(&[(C::Hospital, 1)]);
        with_empty.insert(C::Park, Vec::new());
        let without = amenity_map(&[(C::Hospital, 1)]);
        assert_eq!(
            scorer.score(&with_empty, &WeightVector::new()),
            scorer.score(&without, &WeightVector::new())
        );
    }

    #[rstest]
    fn closeness_ratio_is_none_for_zero_counts() {
        assert_eq!(closeness_ratio(&[0.0, 0.0], &[1.0, 2.0]), None);
    }
}
