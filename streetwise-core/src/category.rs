//! Amenity categories grouping nearby places.
//!
//! The set is closed: every place discovered around a street falls into one
//! of thirteen categories. The declaration order is the catalog order and is
//! also the ordering used when categories key a sorted map.
//!
//! # Examples
//! ```
//! use streetwise_core::AmenityCategory;
//!
//! assert_eq!(AmenityCategory::BusStand.as_str(), "Bus Stand");
//! assert_eq!(AmenityCategory::Park.to_string(), "Park");
//! ```

use thiserror::Error;

/// A category of amenity found near a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmenityCategory {
    /// Hospitals and physiotherapy clinics.
    Hospital,
    /// Schools.
    School,
    /// Universities and colleges.
    College,
    /// Temples, churches and mosques.
    Shrine,
    /// Railway junctions and train stations.
    Junction,
    /// Bus stations.
    #[cfg_attr(feature = "serde", serde(rename = "Bus Stand"))]
    BusStand,
    /// Cinemas and stadiums.
    Entertainment,
    /// Restaurants and cafes.
    Restaurant,
    /// Supermarkets, malls, pharmacies and other stores.
    Shops,
    /// Parks.
    Park,
    /// Gyms.
    Gym,
    /// Fuel stations.
    #[cfg_attr(feature = "serde", serde(rename = "Gas Station"))]
    GasStation,
    /// Banks.
    Bank,
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amenity category '{name}'")]
pub struct ParseCategoryError {
    /// The rejected input.
    pub name: String,
}

impl AmenityCategory {
    /// Every category in catalog order.
    pub const ALL: [Self; 13] = [
        Self::Hospital,
        Self::School,
        Self::College,
        Self::Shrine,
        Self::Junction,
        Self::BusStand,
        Self::Entertainment,
        Self::Restaurant,
        Self::Shops,
        Self::Park,
        Self::Gym,
        Self::GasStation,
        Self::Bank,
    ];

    /// Return the human-readable category name used on the wire.
    ///
    /// # Examples
    /// ```
    /// use streetwise_core::AmenityCategory;
    ///
    /// assert_eq!(AmenityCategory::GasStation.as_str(), "Gas Station");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::School => "School",
            Self::College => "College",
            Self::Shrine => "Shrine",
            Self::Junction => "Junction",
            Self::BusStand => "Bus Stand",
            Self::Entertainment => "Entertainment",
            Self::Restaurant => "Restaurant",
            Self::Shops => "Shops",
            Self::Park => "Park",
            Self::Gym => "Gym",
            Self::GasStation => "Gas Station",
            Self::Bank => "Bank",
        }
    }
}

impl std::fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AmenityCategory {
    type Err = ParseCategoryError;

    /// Parse a category name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseCategoryError {
                name: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(AmenityCategory::BusStand.to_string(), "Bus Stand");
    }

    #[rstest]
    #[case("Hospital", AmenityCategory::Hospital)]
    #[case("bus stand", AmenityCategory::BusStand)]
    #[case("  GAS STATION ", AmenityCategory::GasStation)]
    fn parses_names_case_insensitively(#[case] input: &str, #[case] expected: AmenityCategory) {
        assert_eq!(AmenityCategory::from_str(input), Ok(expected));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = AmenityCategory::from_str("Transports").unwrap_err();
        assert!(err.to_string().contains("unknown amenity category"));
    }

    #[test]
    fn all_is_sorted_in_declaration_order() {
        let mut sorted = AmenityCategory::ALL;
        sorted.sort();
        assert_eq!(sorted, AmenityCategory::ALL);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialises_display_name() {
        let json = serde_json::to_string(&AmenityCategory::BusStand).expect("serialise");
        assert_eq!(json, "\"Bus Stand\"");
    }
}
