//! Collaborator traits consumed by the ranking engine.

use geo::Coord;

use crate::{AirQuality, AmenityMap, StreetCandidate};

use super::error::{GeocodeError, LookupError};

/// Resolve free-text addresses to coordinates.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use streetwise_core::{GeocodeError, Geocoder};
///
/// struct Origin;
///
/// impl Geocoder for Origin {
///     fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
///         if address.is_empty() {
///             return Err(GeocodeError::Unresolvable { address: address.to_owned() });
///         }
///         Ok(Coord { x: 0.0, y: 0.0 })
///     }
/// }
///
/// assert!(Origin.geocode("").is_err());
/// ```
pub trait Geocoder {
    /// Return the position of `address` (`x = longitude`, `y = latitude`).
    ///
    /// Implementations must return [`GeocodeError::Unresolvable`] when the
    /// service answers but finds no match.
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError>;
}

/// One source of candidate streets around a point.
pub trait StreetSource {
    /// Short name used in log messages.
    fn source_name(&self) -> &str;

    /// Return streets within `radius_m` meters of `center`, in source order.
    fn streets_near(
        &self,
        center: Coord<f64>,
        radius_m: u32,
    ) -> Result<Vec<StreetCandidate>, LookupError>;
}

/// Enumerate and describe the amenities around a street.
///
/// # Examples
///
/// ```rust
/// use streetwise_core::{AmenityLookup, AmenityMap, LookupError, StreetCandidate};
///
/// struct Nothing;
///
/// impl AmenityLookup for Nothing {
///     fn lookup_amenities(
///         &self,
///         _street: &StreetCandidate,
///         _radius_m: u32,
///     ) -> Result<AmenityMap, LookupError> {
///         Ok(AmenityMap::new())
///     }
/// }
///
/// let street = StreetCandidate::new("Residency Road", 12.96, 77.6);
/// assert!(Nothing.lookup_amenities(&street, 400)?.is_empty());
/// # Ok::<(), LookupError>(())
/// ```
pub trait AmenityLookup {
    /// Return amenities within `radius_m` meters of `street`.
    ///
    /// Categories without results must be omitted from the map. Failures of
    /// individual sub-requests should be absorbed by the implementation; an
    /// `Err` signals that nothing at all could be fetched.
    fn lookup_amenities(
        &self,
        street: &StreetCandidate,
        radius_m: u32,
    ) -> Result<AmenityMap, LookupError>;
}

/// Fetch the current air quality at a point.
///
/// The lookup is infallible: failures are reported through the sentinel
/// constructors on [`AirQuality`].
pub trait AirQualityProvider {
    /// Return current conditions at `location`.
    fn current_conditions(&self, location: Coord<f64>) -> AirQuality;
}

impl<S: StreetSource + ?Sized> StreetSource for std::sync::Arc<S> {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    fn streets_near(
        &self,
        center: Coord<f64>,
        radius_m: u32,
    ) -> Result<Vec<StreetCandidate>, LookupError> {
        (**self).streets_near(center, radius_m)
    }
}

impl<L: AmenityLookup + ?Sized> AmenityLookup for std::sync::Arc<L> {
    fn lookup_amenities(
        &self,
        street: &StreetCandidate,
        radius_m: u32,
    ) -> Result<AmenityMap, LookupError> {
        (**self).lookup_amenities(street, radius_m)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for std::sync::Arc<G> {
    fn geocode(&self, address: &str) -> Result<Coord<f64>, GeocodeError> {
        (**self).geocode(address)
    }
}

impl<Q: AirQualityProvider + ?Sized> AirQualityProvider for std::sync::Arc<Q> {
    fn current_conditions(&self, location: Coord<f64>) -> AirQuality {
        (**self).current_conditions(location)
    }
}
