//! Category importance weights.
//!
//! A [`WeightVector`] keeps insertion order. The scorer walks its keys in that
//! order, so two vectors with the same entries in a different order are
//! distinct values even though they score identically.

use std::str::FromStr;

use thiserror::Error;

use crate::{AmenityCategory, ParseCategoryError};

/// Errors raised while building a [`WeightVector`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightVectorError {
    /// A weight was zero, negative or not finite.
    #[error("weight {weight} for '{category}' must be positive and finite")]
    InvalidWeight {
        /// The affected category.
        category: AmenityCategory,
        /// The rejected value.
        weight: f64,
    },
    /// A category name did not match any known category.
    #[error(transparent)]
    UnknownCategory(#[from] ParseCategoryError),
}

/// Ordered mapping from category to a positive importance weight.
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityCategory, WeightVector};
///
/// # fn main() -> Result<(), streetwise_core::WeightVectorError> {
/// let weights = WeightVector::new()
///     .with_weight(AmenityCategory::Park, 3.0)?
///     .with_weight(AmenityCategory::Gym, 1.5)?;
/// assert_eq!(weights.weight(AmenityCategory::Park), Some(3.0));
/// assert!(weights.weight(AmenityCategory::Bank).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightVector {
    entries: Vec<(AmenityCategory, f64)>,
}

impl WeightVector {
    /// Construct an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries already known to be valid.
    pub(crate) const fn from_trusted(entries: Vec<(AmenityCategory, f64)>) -> Self {
        Self { entries }
    }

    /// Derive weights from an ordered preference list.
    ///
    /// The first category receives a weight equal to the list length and each
    /// later entry one less. A repeated category keeps its first position and
    /// takes the value of its last occurrence. Unlisted categories receive no
    /// explicit weight.
    ///
    /// # Examples
    /// ```
    /// use streetwise_core::{AmenityCategory, WeightVector};
    ///
    /// let weights = WeightVector::from_preferences(&[
    ///     AmenityCategory::Park,
    ///     AmenityCategory::School,
    ///     AmenityCategory::Gym,
    /// ]);
    /// assert_eq!(weights.weight(AmenityCategory::Park), Some(3.0));
    /// assert_eq!(weights.weight(AmenityCategory::Gym), Some(1.0));
    /// ```
    #[must_use]
    pub fn from_preferences(preferences: &[AmenityCategory]) -> Self {
        let mut weights = Self::new();
        for (rank, category) in (1..=preferences.len()).rev().zip(preferences) {
            weights.upsert(*category, rank_weight(rank));
        }
        weights
    }

    /// Parse an ordered list of category names into preference weights.
    ///
    /// # Errors
    /// Returns [`WeightVectorError::UnknownCategory`] for the first name that
    /// does not match a category.
    pub fn from_preference_names<S: AsRef<str>>(names: &[S]) -> Result<Self, WeightVectorError> {
        let categories = names
            .iter()
            .map(|name| AmenityCategory::from_str(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_preferences(&categories))
    }

    /// Build a vector from `(name, weight)` pairs, keeping their order.
    ///
    /// # Errors
    /// Returns [`WeightVectorError`] when a name is unknown or a weight is not
    /// positive.
    pub fn from_named<I, S>(pairs: I) -> Result<Self, WeightVectorError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        pairs.into_iter().try_fold(Self::new(), |weights, (name, weight)| {
            let category = AmenityCategory::from_str(name.as_ref())?;
            weights.with_weight(category, weight)
        })
    }

    /// Insert or update a weight.
    ///
    /// # Errors
    /// Returns [`WeightVectorError::InvalidWeight`] for zero, negative or
    /// non-finite values; the vector is left unchanged.
    pub fn set_weight(
        &mut self,
        category: AmenityCategory,
        weight: f64,
    ) -> Result<(), WeightVectorError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(WeightVectorError::InvalidWeight { category, weight });
        }
        self.upsert(category, weight);
        Ok(())
    }

    /// Add a weight while returning `self` for chaining.
    ///
    /// # Errors
    /// See [`WeightVector::set_weight`].
    pub fn with_weight(
        mut self,
        category: AmenityCategory,
        weight: f64,
    ) -> Result<Self, WeightVectorError> {
        self.set_weight(category, weight)?;
        Ok(self)
    }

    /// Return the weight for a category, if present.
    #[must_use]
    pub fn weight(&self, category: AmenityCategory) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, weight)| *weight)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AmenityCategory, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of weighted categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether no category carries a weight.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Complete this vector with `defaults`.
    ///
    /// An empty vector resolves to `defaults` unchanged. Otherwise the result
    /// keeps this vector's entries in order, followed by every category of
    /// `defaults` this vector does not mention, in `defaults` order.
    ///
    /// # Examples
    /// ```
    /// use streetwise_core::{AmenityCatalog, AmenityCategory, WeightVector};
    ///
    /// let defaults = AmenityCatalog::standard().default_weights();
    /// let custom = WeightVector::from_preferences(&[AmenityCategory::Bank]);
    /// let resolved = custom.resolved_with(&defaults);
    ///
    /// assert_eq!(resolved.len(), 13);
    /// assert_eq!(resolved.iter().next(), Some((AmenityCategory::Bank, 1.0)));
    /// assert_eq!(resolved.weight(AmenityCategory::Hospital), Some(13.0));
    /// ```
    #[must_use]
    pub fn resolved_with(&self, defaults: &Self) -> Self {
        if self.is_empty() {
            return defaults.clone();
        }
        let mut resolved = self.clone();
        for (category, weight) in defaults.iter() {
            if self.weight(category).is_none() {
                resolved.entries.push((category, weight));
            }
        }
        resolved
    }

    fn upsert(&mut self, category: AmenityCategory, weight: f64) {
        match self.entries.iter_mut().find(|(key, _)| *key == category) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((category, weight)),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "preference lists hold at most a handful of categories"
)]
const fn rank_weight(rank: usize) -> f64 {
    rank as f64
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{Error as _, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::WeightVector;

    impl Serialize for WeightVector {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (category, weight) in self.iter() {
                map.serialize_entry(category.as_str(), &weight)?;
            }
            map.end()
        }
    }

    struct WeightVectorVisitor;

    impl<'de> Visitor<'de> for WeightVectorVisitor {
        type Value = WeightVector;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map from amenity category name to positive weight")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::new();
            while let Some(entry) = access.next_entry::<String, f64>()? {
                pairs.push(entry);
            }
            WeightVector::from_named(pairs).map_err(A::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for WeightVector {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(WeightVectorVisitor)
        }
    }
}
