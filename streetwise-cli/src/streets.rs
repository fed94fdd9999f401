//! `streets` command: rank the streets around a point.
//!
//! Ranking events are written to stdout as they happen, one JSON object per
//! line: `{"count":N}`, then `{"progress":P}` after each street, then
//! `{"streets":[...]}` with the ranked list.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streetwise_core::WeightVector;
use streetwise_data::overpass::DEFAULT_OVERPASS_URL;
use streetwise_ranker::{
    DEFAULT_AMENITY_RADIUS_M, DEFAULT_STREET_RADIUS_M, PreferenceWeights, Ranker, RankingEvent,
    RankingRequest,
};

use crate::collaborators::{CollaboratorBuilder, ServiceConfig};
use crate::fs::{open_utf8_file, require_existing};
use crate::{
    ARG_AMENITY_RADIUS, ARG_GOOGLE_API_KEY, ARG_LAT, ARG_LNG, ARG_OVERPASS_URL,
    ARG_STREET_RADIUS, ARG_TIMEOUT_SECS, ARG_WEIGHTS, CliError, DEFAULT_TIMEOUT_SECS,
    ENV_STREETS_LAT, ENV_STREETS_LNG, write_json_line,
};

/// CLI arguments for the `streets` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Discover residential streets around a point from \
                 OpenStreetMap and Google Places, look up the amenities \
                 around each one and rank them by livability. Progress is \
                 streamed as newline-delimited JSON.",
    about = "Rank the streets around a point"
)]
#[ortho_config(prefix = "STREETWISE")]
pub(crate) struct StreetsArgs {
    /// Latitude of the search centre in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the search centre in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Radius, in meters, searched for streets (default 1000).
    #[arg(long = ARG_STREET_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) street_radius: Option<u32>,
    /// Radius, in meters, searched for amenities around each street
    /// (default 400).
    #[arg(long = ARG_AMENITY_RADIUS, value_name = "meters")]
    #[serde(default)]
    pub(crate) amenity_radius: Option<u32>,
    /// JSON file of category weights, either `{"Hospital": 5, ...}` or the
    /// output of the `weights` command.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Google Maps Platform API key.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Overpass interpreter endpoint.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl StreetsArgs {
    pub(crate) fn into_config(self) -> Result<StreetsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        StreetsConfig::try_from(merged)
    }
}

/// Resolved `streets` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StreetsConfig {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    pub(crate) street_radius: u32,
    pub(crate) amenity_radius: u32,
    pub(crate) weights: Option<Utf8PathBuf>,
    pub(crate) services: ServiceConfig,
}

impl StreetsConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        self.weights
            .as_deref()
            .map_or(Ok(()), |path| require_existing(path, ARG_WEIGHTS))
    }

    fn request(&self, weights: WeightVector) -> RankingRequest {
        RankingRequest {
            lat: self.lat,
            lng: self.lng,
            street_radius: self.street_radius,
            amenity_radius: self.amenity_radius,
            weights,
        }
    }
}

impl TryFrom<StreetsArgs> for StreetsConfig {
    type Error = CliError;

    fn try_from(args: StreetsArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_STREETS_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_STREETS_LNG,
        })?;
        Ok(Self {
            lat,
            lng,
            street_radius: args.street_radius.unwrap_or(DEFAULT_STREET_RADIUS_M),
            amenity_radius: args.amenity_radius.unwrap_or(DEFAULT_AMENITY_RADIUS_M),
            weights: args.weights,
            services: ServiceConfig {
                google_api_key: args.google_api_key,
                overpass_url: args
                    .overpass_url
                    .unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_owned()),
                timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            },
        })
    }
}

/// Weights files hold either a bare category map or `weights` output.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeightsFile {
    Wrapped(PreferenceWeights),
    Plain(WeightVector),
}

/// Loads category weights from a JSON file.
pub(crate) fn load_weights(path: &Utf8Path) -> Result<WeightVector, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenWeights {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let parsed: WeightsFile =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseWeights {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match parsed {
        WeightsFile::Wrapped(wrapped) => wrapped.weights,
        WeightsFile::Plain(weights) => weights,
    })
}

pub(crate) fn run_streets_with(
    args: StreetsArgs,
    builder: &dyn CollaboratorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let weights = config
        .weights
        .as_deref()
        .map_or_else(|| Ok(WeightVector::new()), load_weights)?;
    let request = config.request(weights);
    request.validate()?;
    let services = builder.ranking(&config.services)?;

    let ranker: Ranker = Ranker::default();
    let mut write_failure = None;
    let mut emit = |event: &RankingEvent| {
        if write_failure.is_none()
            && let Err(err) = write_json_line(writer, event)
        {
            write_failure = Some(err);
        }
    };
    ranker.rank_around(&request, &services.discovery, &*services.lookup, &mut emit)?;
    write_failure.map_or(Ok(()), Err)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<StreetsConfig, CliError> {
    let merged = StreetsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    StreetsConfig::try_from(merged)
}
