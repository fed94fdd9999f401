//! `weights` command: preference list to category weights.

use std::io::Write;

use clap::Parser;
use streetwise_ranker::preference_weights;

use crate::{CliError, write_json_line};

/// CLI arguments for the `weights` subcommand.
#[derive(Debug, Clone, Parser, Default)]
#[command(
    long_about = "Weight amenity categories by their position in a preference \
                 list. The first category gets the highest weight. Categories \
                 not listed keep their default weights when ranking.",
    about = "Turn an ordered list of preferred categories into weights"
)]
pub(crate) struct WeightsArgs {
    /// Categories in order of preference, most important first.
    #[arg(value_name = "category")]
    pub(crate) preferences: Vec<String>,
}

pub(crate) fn run_weights(args: &WeightsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let weights = preference_weights(&args.preferences)?;
    write_json_line(writer, &weights)
}
