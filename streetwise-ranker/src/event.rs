//! Notifications emitted while a ranking run progresses.

use serde::{Deserialize, Serialize};
use streetwise_core::ScoredStreet;

/// One notification from a ranking run.
///
/// A run over `N > 0` streets emits `Count(N)`, then one `Progress` per
/// street, then a single `Streets` event. An empty run emits `Progress(100)`
/// followed by an empty `Streets` event.
///
/// Events serialise without a tag, so each is a one-key JSON object:
///
/// ```
/// use streetwise_ranker::RankingEvent;
///
/// let json = serde_json::to_string(&RankingEvent::Progress { progress: 50 })?;
/// assert_eq!(json, r#"{"progress":50}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankingEvent {
    /// Number of distinct streets about to be processed.
    Count {
        /// Street count after deduplication.
        count: usize,
    },
    /// Percentage of streets processed so far.
    Progress {
        /// Whole percent in `0..=100`.
        progress: u8,
    },
    /// Final ranked streets, best first.
    Streets {
        /// Scored streets sorted by descending score.
        streets: Vec<ScoredStreet>,
    },
}

impl RankingEvent {
    /// Report whether this is the terminal event of a run.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Streets { .. })
    }
}

/// Receiver for [`RankingEvent`]s.
///
/// Called synchronously after each unit of work; an implementation may flush
/// output before returning. Closures taking `&RankingEvent` implement it.
pub trait ProgressSink {
    /// Deliver one event.
    fn emit(&mut self, event: &RankingEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(&RankingEvent),
{
    fn emit(&mut self, event: &RankingEvent) {
        self(event);
    }
}
