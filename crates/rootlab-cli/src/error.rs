//! CLI error types.

use std::path::PathBuf;

use rootlab_math::MathError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the settings schema.
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        /// Path of the file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Invalid argument value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error reported by the engine.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
