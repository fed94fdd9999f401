//! Turning an ordered preference list into category weights.

use serde::{Deserialize, Serialize};
use streetwise_core::{WeightVector, WeightVectorError};

/// Weights derived from a preference list, wrapped for transport.
///
/// Serialises as `{"weights": {"<category>": <weight>, ...}}` in preference
/// order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreferenceWeights {
    /// One weight per listed category.
    pub weights: WeightVector,
}

/// Weight the categories in `names` by their position.
///
/// The first name gets a weight equal to the list length and each later one
/// a weight one lower. Categories not listed get no explicit weight, so the
/// scorer falls back to its defaults for them. Names match categories
/// case-insensitively.
///
/// # Errors
/// Returns [`WeightVectorError::UnknownCategory`] for the first name that is
/// not a category.
///
/// # Examples
/// ```
/// use streetwise_ranker::preference_weights;
///
/// let result = preference_weights(&["Park", "bus stand", "Gym"])?;
/// let json = serde_json::to_string(&result).expect("serialise");
/// assert_eq!(json, r#"{"weights":{"Park":3.0,"Bus Stand":2.0,"Gym":1.0}}"#);
/// # Ok::<(), streetwise_core::WeightVectorError>(())
/// ```
pub fn preference_weights<S: AsRef<str>>(
    names: &[S],
) -> Result<PreferenceWeights, WeightVectorError> {
    let weights = WeightVector::from_preference_names(names)?;
    log::debug!("derived {} preference weights", weights.len());
    Ok(PreferenceWeights { weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use streetwise_core::{AmenityCatalog, AmenityCategory as C};

    #[rstest]
    fn empty_list_yields_no_weights() {
        let result = preference_weights::<&str>(&[]).expect("empty is valid");
        assert!(result.weights.is_empty());
        assert_eq!(
            serde_json::to_value(&result).expect("serialise"),
            serde_json::json!({"weights": {}})
        );
    }

    #[rstest]
    fn first_listed_weighs_most() {
        let result = preference_weights(&["School", "Hospital", "Bank", "Park"]).expect("valid");
        let weights: Vec<(C, f64)> = result.weights.iter().collect();
        assert_eq!(
            weights,
            [
                (C::School, 4.0),
                (C::Hospital, 3.0),
                (C::Bank, 2.0),
                (C::Park, 1.0)
            ]
        );
    }

    #[rstest]
    fn unlisted_categories_keep_catalog_defaults() {
        let defaults = AmenityCatalog::standard().default_weights();
        let result = preference_weights(&["Park", "Gym"]).expect("valid");
        let resolved = result.weights.resolved_with(&defaults);
        assert_eq!(resolved.weight(C::Park), Some(2.0));
        assert_eq!(resolved.weight(C::Gym), Some(1.0));
        assert_eq!(resolved.weight(C::Hospital), Some(13.0));
        assert_eq!(resolved.weight(C::School), defaults.weight(C::School));
        assert_eq!(resolved.len(), defaults.len());
    }

    #[rstest]
    fn unknown_names_are_rejected() {
        let err = preference_weights(&["Park", "Casino"]).expect_err("unknown category");
        assert!(matches!(err, WeightVectorError::UnknownCategory(_)));
    }
}
