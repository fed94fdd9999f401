//! Boundaries to the external services the ranking engine relies on.
//!
//! Each trait abstracts one collaborator: geocoding, street discovery,
//! amenity lookup and air quality. Lookups return `Result` so callers can
//! decide explicitly how a failed call degrades; the ranking orchestrator
//! treats a failed amenity lookup as "nothing found" rather than aborting.

mod error;
mod provider;

pub use error::{GeocodeError, LookupError};
pub use provider::{AirQualityProvider, AmenityLookup, Geocoder, StreetSource};
