//! Error type shared by the whole load pipeline.
//!
//! Every variant here is fatal: the binaries log it and exit non-zero.
//! Recoverable conditions (duplicate games, missing fragment directory,
//! fragments without games) never surface as errors, only as warnings.

use std::path::PathBuf;
use thiserror::Error;

use crate::commands::template::TemplateError;

/// Errors that abort a configuration load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The primary configuration file could not be found.
    #[error("could not find the config file {}{hint}", path.display())]
    NotFound { path: PathBuf, hint: String },

    /// A file exists (or was configured) but could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed as TOML.
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A known setting has the wrong shape (e.g. `server_admins` is not a list).
    #[error("invalid settings in {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A roster file could not be tokenised.
    #[error("could not parse roster file {}: {source}", path.display())]
    Roster {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A janitor command entry lacks one of its required fields.
    #[error("janitor command entries must have {field} defined")]
    MissingCommandField { field: &'static str },

    /// A janitor command entry is present but malformed.
    #[error("invalid janitor command #{index}: {reason}")]
    InvalidCommand { index: usize, reason: String },

    /// A janitor command's argument template cannot be parsed.
    #[error("invalid argument template for janitor command '{command}': {source}")]
    Template {
        command: String,
        #[source]
        source: TemplateError,
    },

    /// A game definition is malformed.
    #[error("invalid game definition in {}: {reason}", origin.display())]
    InvalidGame { origin: PathBuf, reason: String },

    /// A map file has no `maps` section.
    #[error("maps section missing from game map file {}", path.display())]
    MissingMaps { path: PathBuf },

    /// A map file's `maps` section is not a list of tables.
    #[error("maps section of game map file {} must be a list of tables", path.display())]
    InvalidMaps { path: PathBuf },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
