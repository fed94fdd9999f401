//! Qualitative noise estimates derived from nearby amenities.

use crate::AmenityMap;

/// Noise score at or above which a street is labelled [`NoiseLabel::High`].
pub const HIGH_NOISE_THRESHOLD: f64 = 7.0;
/// Noise score at or above which a street is labelled [`NoiseLabel::Medium`].
pub const MEDIUM_NOISE_THRESHOLD: f64 = 4.0;

/// Coarse ambient-noise estimate for a street.
///
/// # Examples
/// ```
/// use streetwise_core::NoiseLabel;
///
/// assert_eq!(NoiseLabel::from_score(7.0), NoiseLabel::High);
/// assert_eq!(NoiseLabel::from_score(6.99), NoiseLabel::Medium);
/// assert_eq!(NoiseLabel::from_score(3.99), NoiseLabel::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseLabel {
    /// Quiet surroundings.
    #[default]
    Low,
    /// Moderate activity.
    Medium,
    /// Busy surroundings.
    High,
}

impl NoiseLabel {
    /// Classify a noise score on the `0.0..=10.0` scale.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_NOISE_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_NOISE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Return the label as a `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for NoiseLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduce an amenity map to a noise label.
///
/// Implementations must return [`NoiseLabel::Low`] for an empty map.
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityMap, NoiseEstimator, NoiseLabel};
///
/// struct AlwaysQuiet;
///
/// impl NoiseEstimator for AlwaysQuiet {
///     fn estimate(&self, _amenities: &AmenityMap) -> NoiseLabel {
///         NoiseLabel::Low
///     }
/// }
///
/// assert_eq!(AlwaysQuiet.estimate(&AmenityMap::new()), NoiseLabel::Low);
/// ```
pub trait NoiseEstimator: Send + Sync {
    /// Estimate the noise level around a street.
    fn estimate(&self, amenities: &AmenityMap) -> NoiseLabel;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, NoiseLabel::High)]
    #[case(7.0, NoiseLabel::High)]
    #[case(6.99, NoiseLabel::Medium)]
    #[case(4.0, NoiseLabel::Medium)]
    #[case(3.99, NoiseLabel::Low)]
    #[case(0.0, NoiseLabel::Low)]
    fn thresholds_are_inclusive(#[case] score: f64, #[case] expected: NoiseLabel) {
        assert_eq!(NoiseLabel::from_score(score), expected);
    }

    #[rstest]
    fn display_matches_as_str() {
        assert_eq!(NoiseLabel::Medium.to_string(), "Medium");
    }
}
