//! Sequential ranking of candidate streets.

use std::collections::HashSet;

use streetwise_core::{
    AmenityLookup, AmenityMap, NoiseEstimator, ScoredStreet, StreetCandidate, StreetScorer,
    WeightVector,
};
use streetwise_scorer::{TopsisScorer, WeightedNoiseEstimator};

use crate::event::{ProgressSink, RankingEvent};

/// Default radius, in meters, searched for amenities around each street.
pub const DEFAULT_AMENITY_RADIUS_M: u32 = 400;

/// Configuration for [`Ranker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankerConfig {
    /// Radius passed to the amenity lookup for every street.
    pub amenity_radius_m: u32,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            amenity_radius_m: DEFAULT_AMENITY_RADIUS_M,
        }
    }
}

/// Scores and orders candidate streets one at a time.
///
/// The ranker is generic over the scoring boundaries. Streets are processed
/// strictly in input order with no internal concurrency, so progress events
/// follow processing order.
///
/// # Examples
/// ```
/// use streetwise_core::test_support::{StubAmenityLookup, amenity_map};
/// use streetwise_core::{AmenityCategory, StreetCandidate, WeightVector};
/// use streetwise_ranker::{Ranker, RankingEvent};
///
/// let lookup = StubAmenityLookup::new()
///     .with_amenities("Park Street", amenity_map(&[(AmenityCategory::Park, 2)]));
/// let streets = vec![
///     StreetCandidate::new("Quiet Lane", 12.0, 77.0),
///     StreetCandidate::new("Park Street", 12.1, 77.1),
/// ];
///
/// let ranker: Ranker = Ranker::default();
/// let mut events = Vec::new();
/// let ranked = ranker.rank(streets, &lookup, &WeightVector::new(), &mut |event: &RankingEvent| {
///     events.push(event.clone());
/// });
///
/// assert_eq!(ranked[0].street.name, "Park Street");
/// assert_eq!(events[0], RankingEvent::Count { count: 2 });
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ranker<S = TopsisScorer, N = WeightedNoiseEstimator>
where
    S: StreetScorer,
    N: NoiseEstimator,
{
    scorer: S,
    estimator: N,
    config: RankerConfig,
}

impl<S, N> Ranker<S, N>
where
    S: StreetScorer,
    N: NoiseEstimator,
{
    /// Construct a ranker using default configuration.
    #[must_use]
    pub fn new(scorer: S, estimator: N) -> Self {
        Self::with_config(scorer, estimator, RankerConfig::default())
    }

    /// Construct a ranker with explicit configuration.
    #[must_use]
    pub const fn with_config(scorer: S, estimator: N, config: RankerConfig) -> Self {
        Self {
            scorer,
            estimator,
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Start a run over `streets`, yielding one event per step.
    ///
    /// Duplicate streets are removed first (see [`dedup_streets`]). Each call
    /// to [`Iterator::next`] after the initial count processes exactly one
    /// street, so dropping the run between streets stops further lookups.
    #[must_use]
    pub fn run<'a, L>(
        &'a self,
        streets: Vec<StreetCandidate>,
        lookup: &'a L,
        weights: &'a WeightVector,
    ) -> RankingRun<'a, S, N, L>
    where
        L: AmenityLookup + ?Sized,
    {
        self.start(streets, lookup, weights, self.config.amenity_radius_m)
    }

    pub(crate) fn start<'a, L>(
        &'a self,
        streets: Vec<StreetCandidate>,
        lookup: &'a L,
        weights: &'a WeightVector,
        radius_m: u32,
    ) -> RankingRun<'a, S, N, L>
    where
        L: AmenityLookup + ?Sized,
    {
        let streets = dedup_streets(streets);
        RankingRun {
            ranker: self,
            lookup,
            weights,
            radius_m,
            total: streets.len(),
            pending: streets.into_iter(),
            scored: Vec::new(),
            stage: Stage::Start,
        }
    }

    /// Rank `streets`, delivering every event to `sink`.
    ///
    /// Returns the same list carried by the final
    /// [`RankingEvent::Streets`] event.
    pub fn rank<L, P>(
        &self,
        streets: Vec<StreetCandidate>,
        lookup: &L,
        weights: &WeightVector,
        sink: &mut P,
    ) -> Vec<ScoredStreet>
    where
        L: AmenityLookup + ?Sized,
        P: ProgressSink + ?Sized,
    {
        drain(self.run(streets, lookup, weights), sink)
    }

    fn score_street<L>(
        &self,
        street: StreetCandidate,
        lookup: &L,
        weights: &WeightVector,
        radius_m: u32,
    ) -> ScoredStreet
    where
        L: AmenityLookup + ?Sized,
    {
        let amenities = lookup
            .lookup_amenities(&street, radius_m)
            .unwrap_or_else(|err| {
                log::warn!("amenity lookup failed for '{}': {err}", street.name);
                AmenityMap::new()
            });
        let score = self.scorer.score(&amenities, weights);
        let noise = self.estimator.estimate(&amenities);
        log::debug!("scored '{}': {score} ({noise})", street.name);
        ScoredStreet {
            street,
            score,
            noise,
            amenities,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Scoring,
    Finishing,
    Done,
}

/// A ranking run in progress, created by [`Ranker::run`].
///
/// Yields [`RankingEvent`]s in order and ends after the `Streets` event.
pub struct RankingRun<'a, S, N, L>
where
    S: StreetScorer,
    N: NoiseEstimator,
    L: AmenityLookup + ?Sized,
{
    ranker: &'a Ranker<S, N>,
    lookup: &'a L,
    weights: &'a WeightVector,
    radius_m: u32,
    total: usize,
    pending: std::vec::IntoIter<StreetCandidate>,
    scored: Vec<ScoredStreet>,
    stage: Stage,
}

impl<S, N, L> RankingRun<'_, S, N, L>
where
    S: StreetScorer,
    N: NoiseEstimator,
    L: AmenityLookup + ?Sized,
{
    /// Number of distinct streets in this run.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Streets scored so far, in processing order.
    #[must_use]
    pub fn scored(&self) -> &[ScoredStreet] {
        &self.scored
    }

    fn finish(&mut self) -> RankingEvent {
        self.stage = Stage::Done;
        let mut ranked = std::mem::take(&mut self.scored);
        // `sort_by` is stable: ties keep processing order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        log::info!("ranked {} streets", ranked.len());
        RankingEvent::Streets { streets: ranked }
    }
}

impl<S, N, L> Iterator for RankingRun<'_, S, N, L>
where
    S: StreetScorer,
    N: NoiseEstimator,
    L: AmenityLookup + ?Sized,
{
    type Item = RankingEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stage {
            Stage::Start if self.total == 0 => {
                self.stage = Stage::Finishing;
                Some(RankingEvent::Progress { progress: 100 })
            }
            Stage::Start => {
                self.stage = Stage::Scoring;
                Some(RankingEvent::Count { count: self.total })
            }
            Stage::Scoring => match self.pending.next() {
                Some(street) => {
                    let scored = self.ranker.score_street(
                        street,
                        self.lookup,
                        self.weights,
                        self.radius_m,
                    );
                    self.scored.push(scored);
                    if self.scored.len() == self.total {
                        self.stage = Stage::Finishing;
                    }
                    Some(RankingEvent::Progress {
                        progress: percent_complete(self.scored.len(), self.total),
                    })
                }
                None => Some(self.finish()),
            },
            Stage::Finishing => Some(self.finish()),
            Stage::Done => None,
        }
    }
}

/// Deliver every event of `run` to `sink` and return the ranked streets.
pub(crate) fn drain<I, P>(run: I, sink: &mut P) -> Vec<ScoredStreet>
where
    I: Iterator<Item = RankingEvent>,
    P: ProgressSink + ?Sized,
{
    for event in run {
        sink.emit(&event);
        if let RankingEvent::Streets { streets } = event {
            return streets;
        }
    }
    Vec::new()
}

/// Remove repeated streets, keeping the first occurrence of each
/// [`StreetKey`](streetwise_core::StreetKey).
///
/// # Examples
/// ```
/// use streetwise_core::StreetCandidate;
/// use streetwise_ranker::dedup_streets;
///
/// let streets = dedup_streets(vec![
///     StreetCandidate::new("Hosur Road", 12.9, 77.6),
///     StreetCandidate::new("Hosur Road", 12.900_000_01, 77.6),
///     StreetCandidate::new("Hosur Road", 12.95, 77.6),
/// ]);
/// assert_eq!(streets.len(), 2);
/// ```
#[must_use]
pub fn dedup_streets(streets: Vec<StreetCandidate>) -> Vec<StreetCandidate> {
    let mut seen = HashSet::with_capacity(streets.len());
    streets
        .into_iter()
        .filter(|street| seen.insert(street.key()))
        .collect()
}

/// Whole percentage of `processed` out of `total`, rounding halves up.
///
/// Exact halves go up, so one of eight streets reports 13 rather than the
/// 12 that truncation or banker's rounding would give. Returns 100 when
/// `total` is zero.
fn percent_complete(processed: usize, total: usize) -> u8 {
    let numerator = processed.saturating_mul(200).saturating_add(total);
    numerator
        .checked_div(total.saturating_mul(2))
        .and_then(|percent| u8::try_from(percent).ok())
        .map_or(100, |percent| percent.min(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use streetwise_core::test_support::{StubAmenityLookup, amenity_map};
    use streetwise_core::{AmenityCategory as C, LookupError, NoiseLabel};

    #[fixture]
    fn ranker() -> Ranker {
        Ranker::default()
    }

    fn street(name: &str, offset: f64) -> StreetCandidate {
        StreetCandidate::new(name, 12.97 + offset, 77.59 + offset)
    }

    fn collect(
        ranker: &Ranker,
        streets: Vec<StreetCandidate>,
        lookup: &StubAmenityLookup,
    ) -> (Vec<RankingEvent>, Vec<ScoredStreet>) {
        let mut events = Vec::new();
        let ranked = ranker.rank(streets, lookup, &WeightVector::new(), &mut |event: &RankingEvent| {
            events.push(event.clone());
        });
        (events, ranked)
    }

    #[rstest]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(3, 3, 100)]
    #[case(1, 8, 13)]
    #[case(0, 5, 0)]
    #[case(0, 0, 100)]
    fn percent_rounds_half_up(#[case] processed: usize, #[case] total: usize, #[case] expected: u8) {
        assert_eq!(percent_complete(processed, total), expected);
    }

    #[rstest]
    fn empty_run_reports_completion(ranker: Ranker) {
        let (events, ranked) = collect(&ranker, Vec::new(), &StubAmenityLookup::new());
        assert!(ranked.is_empty());
        assert_eq!(
            events,
            vec![
                RankingEvent::Progress { progress: 100 },
                RankingEvent::Streets { streets: Vec::new() },
            ]
        );
    }

    #[rstest]
    fn events_follow_count_progress_streets(ranker: Ranker) {
        let streets = vec![street("A", 0.0), street("B", 0.01), street("C", 0.02)];
        let (events, ranked) = collect(&ranker, streets, &StubAmenityLookup::new());
        let progress: Vec<RankingEvent> = [33, 67, 100]
            .into_iter()
            .map(|progress| RankingEvent::Progress { progress })
            .collect();
        assert_eq!(events.first(), Some(&RankingEvent::Count { count: 3 }));
        assert_eq!(events.get(1..4), Some(progress.as_slice()));
        assert_eq!(
            events.last(),
            Some(&RankingEvent::Streets {
                streets: ranked.clone()
            })
        );
        assert_eq!(events.len(), 5);
    }

    #[rstest]
    fn sorts_descending_and_keeps_ties_stable(ranker: Ranker) {
        let lookup = StubAmenityLookup::new()
            .with_amenities("Busy", amenity_map(&[(C::Hospital, 1), (C::Park, 2)]))
            .with_amenities("Tie one", amenity_map(&[(C::Bank, 3)]))
            .with_amenities("Tie two", amenity_map(&[(C::Gym, 1)]));
        let streets = vec![
            street("Empty", 0.0),
            street("Tie one", 0.01),
            street("Busy", 0.02),
            street("Tie two", 0.03),
        ];
        let (_, ranked) = collect(&ranker, streets, &lookup);
        let names: Vec<&str> = ranked.iter().map(|s| s.street.name.as_str()).collect();
        assert_eq!(names, ["Busy", "Tie one", "Tie two", "Empty"]);
    }

    #[rstest]
    fn duplicate_streets_are_scored_once(ranker: Ranker) {
        let lookup = StubAmenityLookup::new();
        let streets = vec![
            street("Lavelle Road", 0.0),
            StreetCandidate::new("Lavelle Road", 12.970_000_04, 77.59),
            street("Lavelle Road", 0.5),
        ];
        let (events, ranked) = collect(&ranker, streets, &lookup);
        assert_eq!(ranked.len(), 2);
        assert_eq!(events.first(), Some(&RankingEvent::Count { count: 2 }));
        assert_eq!(lookup.calls(), vec!["Lavelle Road", "Lavelle Road"]);
    }

    #[rstest]
    fn failed_lookup_scores_zero_without_aborting(ranker: Ranker) {
        let lookup = StubAmenityLookup::new()
            .with_error(
                "Broken",
                LookupError::Timeout {
                    url: "https://maps.example/nearby".to_owned(),
                    timeout_secs: 30,
                },
            )
            .with_amenities("Fine", amenity_map(&[(C::School, 2)]));
        let streets = vec![street("Broken", 0.0), street("Fine", 0.1)];
        let (_, ranked) = collect(&ranker, streets, &lookup);
        assert_eq!(ranked.len(), 2);
        let broken = ranked
            .iter()
            .find(|s| s.street.name == "Broken")
            .expect("broken street kept");
        assert_eq!(broken.score, 0.0);
        assert_eq!(broken.noise, NoiseLabel::Low);
        assert!(broken.amenities.is_empty());
    }

    #[rstest]
    fn dropping_a_run_stops_lookups(ranker: Ranker) {
        let lookup = StubAmenityLookup::new();
        let streets = vec![street("A", 0.0), street("B", 0.1), street("C", 0.2)];
        let weights = WeightVector::new();
        let mut run = ranker.run(streets, &lookup, &weights);
        assert_eq!(run.next(), Some(RankingEvent::Count { count: 3 }));
        assert_eq!(run.next(), Some(RankingEvent::Progress { progress: 33 }));
        assert_eq!(run.scored().len(), 1);
        drop(run);
        assert_eq!(lookup.calls(), vec!["A"]);
    }

    #[rstest]
    fn run_ends_after_streets_event(ranker: Ranker) {
        let lookup = StubAmenityLookup::new();
        let weights = WeightVector::new();
        let mut run = ranker.run(vec![street("A", 0.0)], &lookup, &weights);
        assert_eq!(run.total(), 1);
        assert!(run.by_ref().last().is_some_and(|event| event.is_final()));
        assert_eq!(run.next(), None);
    }

    #[rstest]
    fn custom_radius_reaches_lookup() {
        struct RadiusProbe(std::cell::Cell<u32>);
        impl AmenityLookup for RadiusProbe {
            fn lookup_amenities(
                &self,
                _street: &StreetCandidate,
                radius_m: u32,
            ) -> Result<AmenityMap, LookupError> {
                self.0.set(radius_m);
                Ok(AmenityMap::new())
            }
        }
        let ranker = Ranker::with_config(
            TopsisScorer::default(),
            WeightedNoiseEstimator::default(),
            RankerConfig {
                amenity_radius_m: 250,
            },
        );
        let probe = RadiusProbe(std::cell::Cell::new(0));
        let _ = ranker.rank(
            vec![street("A", 0.0)],
            &probe,
            &WeightVector::new(),
            &mut |_: &RankingEvent| {},
        );
        assert_eq!(probe.0.get(), 250);
    }
}
