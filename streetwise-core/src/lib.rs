//! Core domain types for the Streetwise engine.
//!
//! These models describe streets, the amenities found around them and the
//! weights a visitor assigns to each amenity category. Constructors return
//! `Result` where input can be invalid so bad data surfaces early.
//!
//! The crate also defines the seams to external collaborators (geocoding,
//! street discovery, amenity lookup, air quality) and the scoring traits
//! implemented by `streetwise-scorer`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod air_quality;
pub mod amenity;
pub mod catalog;
pub mod category;
pub mod lookup;
pub mod noise;
pub mod scorer;
pub mod street;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod weights;

pub use air_quality::AirQuality;
pub use amenity::{AmenityMap, AmenityRecord};
pub use catalog::{AmenityCatalog, CatalogEntry, CatalogError};
pub use category::{AmenityCategory, ParseCategoryError};
pub use lookup::{
    AirQualityProvider, AmenityLookup, GeocodeError, Geocoder, LookupError, StreetSource,
};
pub use noise::{NoiseEstimator, NoiseLabel};
pub use scorer::{MAX_STREET_SCORE, StreetScorer};
pub use street::{ScoredStreet, StreetCandidate, StreetKey};
pub use weights::{WeightVector, WeightVectorError};
