//! HTTP implementations of the Streetwise collaborator traits.
//!
//! - [`google::GoogleMaps`] geocodes addresses, discovers streets from
//!   nearby places, describes amenities and reports air quality.
//! - [`overpass::OverpassStreetSource`] discovers residential streets from
//!   OpenStreetMap.
//!
//! Both are generic over a [`transport::JsonTransport`]. The default
//! [`transport::HttpTransport`] performs blocking requests with `reqwest`;
//! tests substitute [`test_support::CannedTransport`].

#![forbid(unsafe_code)]

pub mod google;
pub mod overpass;
#[doc(hidden)]
pub mod test_support;
pub mod transport;

pub use google::{GoogleConfig, GoogleMaps};
pub use overpass::{OverpassConfig, OverpassStreetSource};
pub use transport::{ClientBuildError, HttpConfig, HttpTransport, JsonTransport};
