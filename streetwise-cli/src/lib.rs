//! Command-line interface for the Streetwise ranking engine.
//!
//! Three subcommands are provided:
//!
//! - `search <address>` prints the position and air quality of an address.
//! - `streets --lat --lng` streams ranking events as newline-delimited JSON.
//! - `weights <category>...` prints weights derived from a preference list.
//!
//! Options can also come from configuration files and `STREETWISE_*`
//! environment variables through `ortho_config`.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod collaborators;
mod error;
mod fs;
mod logging;
mod search;
mod streets;
mod weights;

pub use error::CliError;
pub use logging::init_logging;

use collaborators::HttpCollaborators;
use search::{SearchArgs, run_search_with};
use streets::{StreetsArgs, run_streets_with};
use weights::{WeightsArgs, run_weights};

pub(crate) const ARG_ADDRESS: &str = "address";
pub(crate) const ARG_GOOGLE_API_KEY: &str = "google-api-key";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ARG_STREET_RADIUS: &str = "street-radius";
pub(crate) const ARG_AMENITY_RADIUS: &str = "amenity-radius";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_OVERPASS_URL: &str = "overpass-url";
pub(crate) const ENV_SEARCH_ADDRESS: &str = "STREETWISE_CMDS_SEARCH_ADDRESS";
pub(crate) const ENV_STREETS_LAT: &str = "STREETWISE_CMDS_STREETS_LAT";
pub(crate) const ENV_STREETS_LNG: &str = "STREETWISE_CMDS_STREETS_LNG";

/// Request timeout used when none is configured.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run the Streetwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, a
/// collaborator cannot be built, the address cannot be geocoded or output
/// cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli, &HttpCollaborators, &mut stdout)
}

fn dispatch(
    cli: Cli,
    builder: &dyn collaborators::CollaboratorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match cli.command {
        Command::Search(args) => run_search_with(args, builder, writer),
        Command::Streets(args) => run_streets_with(args, builder, writer),
        Command::Weights(args) => run_weights(&args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "streetwise",
    about = "Rank the streets around a place by the amenities nearby",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode an address and report its air quality.
    Search(SearchArgs),
    /// Rank the streets around a point, streaming progress as JSON lines.
    Streets(StreetsArgs),
    /// Turn an ordered list of preferred categories into weights.
    Weights(WeightsArgs),
}

/// Write `value` as one line of compact JSON.
pub(crate) fn write_json_line<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    writer.flush().map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
