//! Error types emitted by the Streetwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use streetwise_core::{GeocodeError, WeightVectorError};
use streetwise_data::ClientBuildError;
use streetwise_ranker::RequestError;
use thiserror::Error;

/// Errors emitted by the Streetwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the weights file failed.
    #[error("failed to open weights file at {path:?}: {source}")]
    OpenWeights {
        /// Weights file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The weights file is not a JSON object of category weights.
    #[error("failed to parse weights JSON at {path:?}: {source}")]
    ParseWeights {
        /// Weights file path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A preference named an unknown category.
    #[error(transparent)]
    InvalidPreferences(#[from] WeightVectorError),
    /// The ranking request failed validation.
    #[error("invalid ranking request: {0}")]
    InvalidRequest(#[from] RequestError),
    /// Building an HTTP collaborator failed.
    #[error("failed to build {service} client: {source}")]
    BuildClient {
        /// Service being configured.
        service: &'static str,
        /// Underlying build error.
        #[source]
        source: ClientBuildError,
    },
    /// The address could not be geocoded.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
