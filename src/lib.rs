//! Facade crate for the Streetwise street ranking engine.
//!
//! This crate re-exports the domain types, the TOPSIS scorer, the ranking
//! orchestrator and, behind the `http` feature, the Google Maps and
//! Overpass collaborators.
//!
//! # Example
//!
//! ```
//! use streetwise::{AmenityCategory, AmenityMap, AmenityRecord, StreetScorer, TopsisScorer, WeightVector};
//!
//! let amenities = AmenityMap::new()
//!     .with_place(AmenityCategory::Hospital, AmenityRecord::new("General Hospital", 13.0, 80.2));
//! let score = TopsisScorer::default().score(&amenities, &WeightVector::new());
//! assert!((0.0..=10.0).contains(&score));
//! ```

#![forbid(unsafe_code)]

pub use streetwise_core::{
    AirQuality, AirQualityProvider, AmenityCatalog, AmenityCategory, AmenityLookup, AmenityMap,
    AmenityRecord, CatalogEntry, CatalogError, GeocodeError, Geocoder, LookupError,
    MAX_STREET_SCORE, NoiseEstimator, NoiseLabel, ParseCategoryError, ScoredStreet,
    StreetCandidate, StreetKey, StreetScorer, StreetSource, WeightVector, WeightVectorError,
};
pub use streetwise_ranker::{
    PreferenceWeights, ProgressSink, Ranker, RankerConfig, RankingEvent, RankingRequest,
    RequestError, SearchReport, StreetDiscovery, preference_weights, survey,
};
pub use streetwise_scorer::{NoiseTable, NoiseTableError, TopsisScorer, WeightedNoiseEstimator};

#[cfg(feature = "http")]
pub use streetwise_data::{
    ClientBuildError, GoogleConfig, GoogleMaps, HttpConfig, HttpTransport, OverpassConfig,
    OverpassStreetSource,
};

#[cfg(feature = "test-support")]
pub use streetwise_core::test_support;
