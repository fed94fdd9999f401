//! Test doubles and fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use streetwise_core::test_support::{
    FixedAirQuality, StubAmenityLookup, StubGeocoder, StubStreetSource, amenity_map,
};
use streetwise_core::{AirQuality, AmenityCategory, StreetCandidate};
use streetwise_ranker::StreetDiscovery;
use tempfile::TempDir;

use crate::collaborators::{CollaboratorBuilder, RankingServices, ServiceConfig, SurveyServices};
use crate::CliError;

/// Builder answering from fixed data, with no network access.
#[derive(Debug, Clone)]
pub(super) struct StubCollaborators {
    pub(super) geocoder: StubGeocoder,
    pub(super) air_quality: AirQuality,
    pub(super) streets: Vec<StreetCandidate>,
    pub(super) amenities: Vec<(String, Vec<(AmenityCategory, usize)>)>,
}

impl Default for StubCollaborators {
    fn default() -> Self {
        Self {
            geocoder: StubGeocoder::default()
                .with_address("Besant Nagar", Coord { x: 80.2668, y: 13.0002 }),
            air_quality: AirQuality::reading(64, "Moderate", "#FFFF00"),
            streets: vec![
                StreetCandidate::new("2nd Avenue", 13.0003, 80.2671),
                StreetCandidate::new("Beach Road", 12.9989, 80.2719),
            ],
            amenities: vec![(
                "Beach Road".to_owned(),
                vec![(AmenityCategory::Park, 2), (AmenityCategory::Hospital, 1)],
            )],
        }
    }
}

impl CollaboratorBuilder for StubCollaborators {
    fn survey(&self, _config: &ServiceConfig) -> Result<SurveyServices, CliError> {
        Ok(SurveyServices {
            geocoder: Box::new(self.geocoder.clone()),
            air_quality: Box::new(FixedAirQuality(self.air_quality.clone())),
        })
    }

    fn ranking(&self, _config: &ServiceConfig) -> Result<RankingServices, CliError> {
        let lookup = self
            .amenities
            .iter()
            .fold(StubAmenityLookup::new(), |lookup, (street, counts)| {
                lookup.with_amenities(street.clone(), amenity_map(counts))
            });
        Ok(RankingServices {
            discovery: StreetDiscovery::new()
                .with_source(StubStreetSource::with_streets("stub", self.streets.clone())),
            lookup: Box::new(lookup),
        })
    }
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// Run the CLI against `builder`, capturing stdout.
pub(super) fn run_cli(
    argv: &[&str],
    builder: &dyn CollaboratorBuilder,
) -> (Result<(), CliError>, String) {
    let mut stdout = Vec::new();
    let outcome = crate::Cli::try_parse_from(argv)
        .map_err(CliError::from)
        .and_then(|cli| crate::dispatch(cli, builder, &mut stdout));
    let printed = String::from_utf8(stdout).expect("stdout utf-8");
    (outcome, printed)
}
