//! Points of interest discovered around a street, grouped by category.

use std::collections::BTreeMap;

use geo::Coord;

use crate::AmenityCategory;

/// A single place found near a street.
///
/// Coordinates are WGS84. [`AmenityRecord::location`] returns them as a
/// [`Coord`] with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use streetwise_core::AmenityRecord;
///
/// let record = AmenityRecord::new("City Hospital", 12.97, 77.59);
/// assert_eq!(record.rating, 0.0);
/// assert!(record.open_now.is_none());
/// assert_eq!(record.location().y, 12.97);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmenityRecord {
    /// Display name.
    pub name: String,
    /// Average rating, `0.0` when unknown.
    pub rating: f64,
    /// Number of user reviews.
    pub reviews: u32,
    /// Distance in whole meters from the street point.
    pub distance: u32,
    /// Formatted postal address, possibly empty.
    pub address: String,
    /// Whether the place is open right now; `None` when unknown.
    pub open_now: Option<bool>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Photo URLs, possibly empty.
    pub photos: Vec<String>,
}

impl AmenityRecord {
    /// Construct a record with only a name and position; other details take
    /// their "unknown" values.
    #[must_use]
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            rating: 0.0,
            reviews: 0,
            distance: 0,
            address: String::new(),
            open_now: None,
            lat,
            lng,
            photos: Vec::new(),
        }
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.lng,
            y: self.lat,
        }
    }
}

/// Amenities around one street keyed by category.
///
/// Categories without any discovered place are normally absent. Maps decoded
/// from external payloads may still carry empty lists; [`AmenityMap::count`]
/// treats both shapes as zero.
///
/// # Examples
/// ```
/// use streetwise_core::{AmenityCategory, AmenityMap, AmenityRecord};
///
/// let mut map = AmenityMap::new();
/// map.insert(AmenityCategory::Park, vec![AmenityRecord::new("Cubbon Park", 12.97, 77.59)]);
/// map.insert(AmenityCategory::Bank, Vec::new());
///
/// assert_eq!(map.count(AmenityCategory::Park), 1);
/// assert_eq!(map.count(AmenityCategory::Bank), 0);
/// assert!(map.get(AmenityCategory::Bank).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AmenityMap {
    places: BTreeMap<AmenityCategory, Vec<AmenityRecord>>,
}

impl AmenityMap {
    /// Construct an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the places for `category`, replacing any earlier list.
    ///
    /// An empty list removes the category so absence stays the canonical
    /// shape for "nothing found".
    pub fn insert(&mut self, category: AmenityCategory, places: Vec<AmenityRecord>) {
        if places.is_empty() {
            self.places.remove(&category);
        } else {
            self.places.insert(category, places);
        }
    }

    /// Add a place while returning `self` for chaining.
    #[must_use]
    pub fn with_place(mut self, category: AmenityCategory, place: AmenityRecord) -> Self {
        self.places.entry(category).or_default().push(place);
        self
    }

    /// Number of places in `category`; zero when absent or empty.
    #[must_use]
    pub fn count(&self, category: AmenityCategory) -> usize {
        self.places.get(&category).map_or(0, Vec::len)
    }

    /// Places for `category`, if any were found.
    #[must_use]
    pub fn get(&self, category: AmenityCategory) -> Option<&[AmenityRecord]> {
        self.places
            .get(&category)
            .filter(|places| !places.is_empty())
            .map(Vec::as_slice)
    }

    /// Iterate over categories in catalog order with their places.
    pub fn iter(&self) -> impl Iterator<Item = (AmenityCategory, &[AmenityRecord])> + '_ {
        self.places
            .iter()
            .map(|(category, places)| (*category, places.as_slice()))
    }

    /// Total number of places across every category.
    #[must_use]
    pub fn total_places(&self) -> usize {
        self.places.values().map(Vec::len).sum()
    }

    /// Report whether no places were found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_places() == 0
    }
}

impl FromIterator<(AmenityCategory, Vec<AmenityRecord>)> for AmenityMap {
    fn from_iter<I: IntoIterator<Item = (AmenityCategory, Vec<AmenityRecord>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (category, places) in iter {
            map.insert(category, places);
        }
        map
    }
}
