//! Focused unit tests covering CLI configuration and command output.

use super::helpers::{StubCollaborators, run_cli, utf8_tempdir, write_utf8};
use super::*;
use crate::search::{SearchArgs, SearchConfig};
use crate::streets::{StreetsArgs, StreetsConfig, load_weights};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};
use streetwise_core::{AmenityCategory, WeightVector};

#[rstest]
fn converting_search_without_address_errors() {
    let err = SearchConfig::try_from(SearchArgs::default()).expect_err("missing address");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ADDRESS);
            assert_eq!(env, ENV_SEARCH_ADDRESS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, Some(80.27), ARG_LAT, ENV_STREETS_LAT)]
#[case(Some(13.0), None, ARG_LNG, ENV_STREETS_LNG)]
fn converting_streets_without_coordinates_errors(
    #[case] lat: Option<f64>,
    #[case] lng: Option<f64>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = StreetsArgs {
        lat,
        lng,
        ..StreetsArgs::default()
    };
    let err = StreetsConfig::try_from(args).expect_err("missing coordinate");
    match err {
        CliError::MissingArgument { field: missing, env } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn streets_config_applies_defaults() {
    let args = StreetsArgs {
        lat: Some(13.0),
        lng: Some(80.27),
        ..StreetsArgs::default()
    };
    let config = StreetsConfig::try_from(args).expect("config should build");
    assert_eq!(config.street_radius, 1000);
    assert_eq!(config.amenity_radius, 400);
    assert_eq!(config.services.overpass_url, "https://overpass-api.de/api/interpreter");
    assert_eq!(config.services.timeout.as_secs(), DEFAULT_TIMEOUT_SECS);
    assert!(config.services.google_api_key.is_none());
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({"lat": 1.0, "lng": 2.0, "street_radius": 500, "google_api_key": "from-file"}),
        None,
    );
    composer.push_environment(json!({"lat": 13.0, "google_api_key": "from-env"}));
    composer.push_cli(json!({"lng": 80.27}));

    let config =
        streets::config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.lat, 13.0);
    assert_eq!(config.lng, 80.27);
    assert_eq!(config.street_radius, 500);
    assert_eq!(config.services.google_api_key.as_deref(), Some("from-env"));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({"address": 42}));
    let err = search::config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should fail");
    assert!(matches!(err, CliError::Configuration(_)), "{err:?}");
}

#[rstest]
#[case::plain(r#"{"Park": 5, "hospital": 2}"#)]
#[case::wrapped(r#"{"weights": {"Park": 5, "Hospital": 2}}"#)]
fn load_weights_accepts_both_shapes(#[case] contents: &str) {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("weights.json");
    write_utf8(&path, contents.as_bytes());
    let weights = load_weights(&path).expect("weights decode");
    assert_eq!(
        weights,
        WeightVector::new()
            .with_weight(AmenityCategory::Park, 5.0)
            .expect("valid weight")
            .with_weight(AmenityCategory::Hospital, 2.0)
            .expect("valid weight")
    );
}

#[rstest]
fn load_weights_rejects_unknown_categories() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("weights.json");
    write_utf8(&path, br#"{"Casino": 4}"#);
    let err = load_weights(&path).expect_err("unknown category");
    assert!(matches!(err, CliError::ParseWeights { .. }), "{err:?}");
}

#[rstest]
fn weights_command_prints_position_weights() {
    let (outcome, stdout) = run_cli(
        &["streetwise", "weights", "Park", "bus stand", "Gym"],
        &StubCollaborators::default(),
    );
    outcome.expect("weights succeed");
    let printed: Value = serde_json::from_str(stdout.trim_end()).expect("json output");
    assert_eq!(
        printed,
        json!({"weights": {"Park": 3.0, "Bus Stand": 2.0, "Gym": 1.0}})
    );
}

#[rstest]
fn weights_command_rejects_unknown_categories() {
    let (outcome, stdout) = run_cli(
        &["streetwise", "weights", "Park", "Casino"],
        &StubCollaborators::default(),
    );
    assert!(matches!(outcome, Err(CliError::InvalidPreferences(_))));
    assert!(stdout.is_empty());
}

#[rstest]
fn negative_coordinates_parse() {
    let cli = Cli::try_parse_from(["streetwise", "streets", "--lat", "-33.86", "--lng", "151.2"])
        .expect("negative latitude parses");
    match cli.command {
        Command::Streets(args) => assert_eq!(args.lat, Some(-33.86)),
        other => panic!("expected streets command, found {other:?}"),
    }
}
