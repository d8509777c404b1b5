//! Startup orchestration.
//!
//! # Responsibilities
//! - Locate and parse the primary config file
//! - Initialize logging from its `[logging]` table
//! - Run the rest of the load pipeline with logging in place
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Errors raised before logging exists are returned for the binary to print

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{resolve_config_path, Config, ConfigError, ConfigStore, DocumentSource, ServerSettings};
use crate::observability::logging::{self, LoggingError};

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Load the configuration, installing the global log subscriber on the way.
pub fn bootstrap(
    explicit_path: Option<&Path>,
    source: Arc<dyn DocumentSource>,
) -> Result<ConfigStore, StartupError> {
    let path = resolve_config_path(explicit_path)?;
    let document = source.load_document(&path)?;
    let settings = ServerSettings::from_document(&path, &document)?;

    logging::init(&settings.logging)?;
    tracing::info!(path = %path.display(), "webtiles-conf v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::from_document(&path, document, source.as_ref())?;
    Ok(ConfigStore::from_config(config, source))
}
