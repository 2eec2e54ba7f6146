//! Error types for `ortho-merge`.

use camino::Utf8PathBuf;
use ortho_merge::{ConversionError, MergeError};
use thiserror::Error;

/// Errors that can occur while running `ortho-merge`.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O errors while reading inputs or writing the result.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file did not contain valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Input path.
        path: Utf8PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// An input file did not contain valid TOML.
    #[error("invalid TOML in {path}: {source}")]
    Toml {
        /// Input path.
        path: Utf8PathBuf,
        /// Parser error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The input extension is neither `.json` nor `.toml`.
    #[error("unsupported input format for {path}; expected .json or .toml")]
    UnsupportedFormat {
        /// Input path.
        path: Utf8PathBuf,
    },

    /// The input's top-level value is not an object.
    #[error("{path} must contain an object at the top level")]
    NotAnObject {
        /// Input path.
        path: Utf8PathBuf,
    },

    /// Options could not be loaded or the merge failed.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The merged structure could not be turned into JSON.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The merged document could not be serialised.
    #[error("failed to serialise the merged document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The logging subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),
}
