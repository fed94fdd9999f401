//! `search` command: where is an address and how is the air there?

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streetwise_data::overpass::DEFAULT_OVERPASS_URL;
use streetwise_ranker::survey;

use crate::collaborators::{CollaboratorBuilder, ServiceConfig};
use crate::{
    ARG_ADDRESS, ARG_GOOGLE_API_KEY, ARG_TIMEOUT_SECS, CliError, DEFAULT_TIMEOUT_SECS,
    ENV_SEARCH_ADDRESS, write_json_line,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Geocode a free-text address and report its coordinates \
                 together with the current air-quality index. Addresses \
                 are biased towards India.",
    about = "Geocode an address and report its air quality"
)]
#[ortho_config(prefix = "STREETWISE")]
pub(crate) struct SearchArgs {
    /// Free-text address to look up.
    #[arg(value_name = "address")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Google Maps Platform API key.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) address: String,
    pub(crate) services: ServiceConfig,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let address = args
            .address
            .filter(|text| !text.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ADDRESS,
                env: ENV_SEARCH_ADDRESS,
            })?;
        Ok(Self {
            address,
            services: ServiceConfig {
                google_api_key: args.google_api_key,
                overpass_url: DEFAULT_OVERPASS_URL.to_owned(),
                timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            },
        })
    }
}

pub(crate) fn run_search_with(
    args: SearchArgs,
    builder: &dyn CollaboratorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let services = builder.survey(&config.services)?;
    let report = survey(
        &config.address,
        &*services.geocoder,
        &*services.air_quality,
    )?;
    log::info!("resolved '{}' to ({}, {})", report.address, report.lat, report.lng);
    write_json_line(writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
