//! The amenity catalog: which external place types feed each category and how
//! much each category matters by default.
//!
//! The catalog is plain data built once and passed to whatever needs it. The
//! place types are consumed by amenity lookups; the default weights seed the
//! scorer when a caller supplies no preferences.

use thiserror::Error;

use crate::{AmenityCategory, WeightVector};

/// One catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Category described by this row.
    pub category: AmenityCategory,
    /// External place-type tags searched for this category.
    pub place_types: Vec<String>,
    /// Default importance weight. Higher values matter more.
    pub default_weight: f64,
}

impl CatalogEntry {
    /// Build a row. Weights are validated by [`AmenityCatalog::new`].
    #[must_use]
    pub fn new<I>(category: AmenityCategory, place_types: I, default_weight: f64) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            category,
            place_types: place_types.into_iter().map(Into::into).collect(),
            default_weight,
        }
    }

    fn standard(category: AmenityCategory, place_types: &[&str], default_weight: f64) -> Self {
        Self::new(category, place_types.iter().copied(), default_weight)
    }
}

/// Errors returned by [`AmenityCatalog::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// No rows were supplied.
    #[error("amenity catalog must contain at least one category")]
    Empty,
    /// A category appeared twice.
    #[error("category '{category}' appears more than once in the catalog")]
    DuplicateCategory {
        /// The repeated category.
        category: AmenityCategory,
    },
    /// A default weight was zero, negative or not finite.
    #[error("default weight {weight} for '{category}' must be positive and finite")]
    InvalidWeight {
        /// The affected category.
        category: AmenityCategory,
        /// The rejected weight.
        weight: f64,
    },
}

/// Ordered mapping from category to place types and default weight.
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityCatalog, AmenityCategory};
///
/// let catalog = AmenityCatalog::standard();
/// let weights = catalog.default_weights();
/// assert_eq!(weights.weight(AmenityCategory::Hospital), Some(13.0));
/// assert_eq!(weights.weight(AmenityCategory::Bank), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AmenityCatalog {
    entries: Vec<CatalogEntry>,
}

impl AmenityCatalog {
    /// Validate and construct a catalog from explicit rows.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the rows are empty, repeat a category or
    /// carry a non-positive weight.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (position, entry) in entries.iter().enumerate() {
            if !(entry.default_weight.is_finite() && entry.default_weight > 0.0) {
                return Err(CatalogError::InvalidWeight {
                    category: entry.category,
                    weight: entry.default_weight,
                });
            }
            let repeated = entries
                .iter()
                .take(position)
                .any(|earlier| earlier.category == entry.category);
            if repeated {
                return Err(CatalogError::DuplicateCategory {
                    category: entry.category,
                });
            }
        }
        Ok(Self { entries })
    }

    /// The built-in catalog of thirteen categories, ranked Hospital (13) down
    /// to Bank (1).
    #[must_use]
    pub fn standard() -> Self {
        use AmenityCategory as C;
        Self {
            entries: vec![
                CatalogEntry::standard(C::Hospital, &["hospital", "physiotherapist"], 13.0),
                CatalogEntry::standard(C::School, &["school"], 12.0),
                CatalogEntry::standard(C::College, &["university"], 11.0),
                CatalogEntry::standard(C::Shrine, &["hindu_temple", "church", "mosque"], 10.0),
                CatalogEntry::standard(C::Junction, &["train_station"], 9.0),
                CatalogEntry::standard(C::BusStand, &["bus_station"], 8.0),
                CatalogEntry::standard(C::Entertainment, &["movie_theater", "stadium"], 7.0),
                CatalogEntry::standard(C::Restaurant, &["restaurant", "cafe"], 6.0),
                CatalogEntry::standard(
                    C::Shops,
                    &[
                        "supermarket",
                        "grocery_or_supermarket",
                        "shopping_mall",
                        "clothing_store",
                        "convenience_store",
                        "pharmacy",
                    ],
                    5.0,
                ),
                CatalogEntry::standard(C::Park, &["park"], 4.0),
                CatalogEntry::standard(C::Gym, &["gym"], 3.0),
                CatalogEntry::standard(C::GasStation, &["gas_station"], 2.0),
                CatalogEntry::standard(C::Bank, &["bank"], 1.0),
            ],
        }
    }

    /// Categories in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = AmenityCategory> + '_ {
        self.entries.iter().map(|entry| entry.category)
    }

    /// Rows in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Return the row for `category`, if the catalog lists it.
    #[must_use]
    pub fn entry(&self, category: AmenityCategory) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.category == category)
    }

    /// Place types searched for `category`; empty when the category is not
    /// listed.
    #[must_use]
    pub fn place_types(&self, category: AmenityCategory) -> &[String] {
        match self.entry(category) {
            Some(entry) => &entry.place_types,
            None => &[],
        }
    }

    /// Default weights for every listed category, in catalog order.
    #[must_use]
    pub fn default_weights(&self) -> WeightVector {
        WeightVector::from_trusted(
            self.entries
                .iter()
                .map(|entry| (entry.category, entry.default_weight))
                .collect(),
        )
    }
}

impl Default for AmenityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn standard_catalog_covers_every_category_in_order() {
        let catalog = AmenityCatalog::standard();
        let categories: Vec<_> = catalog.categories().collect();
        assert_eq!(categories, AmenityCategory::ALL);
    }

    #[rstest]
    fn default_weights_descend_from_thirteen_to_one() {
        let weights = AmenityCatalog::standard().default_weights();
        let values: Vec<f64> = weights.iter().map(|(_, weight)| weight).collect();
        let expected: Vec<f64> = (1..=13).rev().map(f64::from).collect();
        assert_eq!(values, expected);
    }

    #[rstest]
    #[case(AmenityCategory::Shrine, &["hindu_temple", "church", "mosque"])]
    #[case(AmenityCategory::Junction, &["train_station"])]
    #[case(AmenityCategory::Restaurant, &["restaurant", "cafe"])]
    fn place_types_follow_catalog(#[case] category: AmenityCategory, #[case] expected: &[&str]) {
        let catalog = AmenityCatalog::standard();
        assert_eq!(catalog.place_types(category), expected);
    }

    #[rstest]
    fn custom_catalog_omits_unlisted_categories() {
        let catalog = AmenityCatalog::new(vec![CatalogEntry {
            category: AmenityCategory::Park,
            place_types: vec!["park".into()],
            default_weight: 2.0,
        }])
        .expect("valid catalog");
        assert!(catalog.place_types(AmenityCategory::Bank).is_empty());
        assert_eq!(catalog.default_weights().len(), 1);
    }

    #[rstest]
    fn rejects_empty_catalog() {
        assert_eq!(AmenityCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[rstest]
    fn rejects_duplicate_categories() {
        let row = CatalogEntry {
            category: AmenityCategory::Gym,
            place_types: vec!["gym".into()],
            default_weight: 1.0,
        };
        let err = AmenityCatalog::new(vec![row.clone(), row]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateCategory {
                category: AmenityCategory::Gym
            }
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn rejects_non_positive_weights(#[case] weight: f64) {
        let row = CatalogEntry {
            category: AmenityCategory::Bank,
            place_types: Vec::new(),
            default_weight: weight,
        };
        assert!(matches!(
            AmenityCatalog::new(vec![row]),
            Err(CatalogError::InvalidWeight { .. })
        ));
    }
}
