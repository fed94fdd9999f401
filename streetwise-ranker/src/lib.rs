//! Ranking orchestration for Streetwise.
//!
//! [`Ranker`] scores candidate streets one at a time and reports progress
//! through [`RankingEvent`]s, either pulled from a [`RankingRun`] iterator or
//! pushed to a [`ProgressSink`]. Around it sit the operations a transport
//! layer exposes:
//!
//! - [`Ranker::rank_around`] discovers streets near a point with a
//!   [`StreetDiscovery`] and ranks them for a [`RankingRequest`].
//! - [`survey`] geocodes an address and reports its air quality.
//! - [`preference_weights`] turns an ordered category list into weights.
//!
//! Collaborator failures never abort a run: a failed street source or amenity
//! lookup is logged and treated as "nothing found".

#![forbid(unsafe_code)]

mod discovery;
mod event;
mod preferences;
mod ranker;
mod request;
mod survey;

pub use discovery::{DEFAULT_STREET_RADIUS_M, StreetDiscovery};
pub use event::{ProgressSink, RankingEvent};
pub use preferences::{PreferenceWeights, preference_weights};
pub use ranker::{DEFAULT_AMENITY_RADIUS_M, Ranker, RankerConfig, RankingRun, dedup_streets};
pub use request::{RankingRequest, RequestError};
pub use survey::{SearchReport, survey};
