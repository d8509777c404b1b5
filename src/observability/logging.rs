//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber from the `[logging]` table
//! - Write to stderr, or to a size-rotated log file
//! - Pick the level from `RUST_LOG`, the config, or `WEBTILES_DEBUG`
//!
//! # Design Decisions
//! - `RUST_LOG` wins over everything so operators can debug a deployment
//! - Rotation mirrors the classic scheme: `file` → `file.1` → … → `file.N`
//! - Events on the `access` target are dropped unless `enable_access_log` is set

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::{Directive, EnvFilter, ParseError};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

use crate::config::schema::LoggingSettings;

/// Target used by the server for per-request access log lines.
pub const ACCESS_LOG_TARGET: &str = "access";

/// Setting this variable to anything enables debug logging when no level is configured.
pub const DEBUG_ENV_VAR: &str = "WEBTILES_DEBUG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("could not install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Output style of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse the `format` setting. Unset means [`LogFormat::Full`].
    pub fn from_setting(format: Option<&str>) -> Option<Self> {
        match format.map(str::to_ascii_lowercase).as_deref() {
            None | Some("full") => Some(LogFormat::Full),
            Some("compact") => Some(LogFormat::Compact),
            Some("pretty") => Some(LogFormat::Pretty),
            Some("json") => Some(LogFormat::Json),
            Some(_) => None,
        }
    }
}

/// Build the level filter for `settings`.
pub fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, LoggingError> {
    let level = match &settings.level {
        Some(level) => level.as_directive(),
        None if std::env::var_os(DEBUG_ENV_VAR).is_some() => "debug",
        None => "info",
    };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    if !settings.enable_access_log {
        let directive: Directive = format!("{ACCESS_LOG_TARGET}=off").parse()?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Install the global subscriber. Call once, before loading the rest of the config.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let filter = build_filter(settings)?;

    let (writer, ansi) = match &settings.filename {
        Some(path) => {
            let file = RotatingFile::open(path, settings.max_bytes, settings.backup_count)
                .map_err(|source| LoggingError::Open {
                    path: path.clone(),
                    source,
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let timer = match &settings.datefmt {
        Some(datefmt) => ChronoLocal::new(datefmt.clone()),
        None => ChronoLocal::rfc_3339(),
    };

    let format = LogFormat::from_setting(settings.format.as_deref());
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(ansi);
    let layer = match format.unwrap_or(LogFormat::Full) {
        LogFormat::Full => base.boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    if format.is_none() {
        tracing::warn!(format = ?settings.format, "Unknown log format, using full");
    }
    Ok(())
}

/// Log file that rotates once it would grow past `max_bytes`.
///
/// Rotation is disabled when `max_bytes` or `backup_count` is 0.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    size: u64,
    max_bytes: u64,
    backup_count: u32,
}

impl RotatingFile {
    pub fn open(path: &Path, max_bytes: u64, backup_count: u32) -> io::Result<Self> {
        let file = Self::open_append(path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
            max_bytes,
            backup_count,
        })
    }

    fn open_append(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Path of the `n`th backup, e.g. `webtiles.log.2`.
    pub fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.size > 0
            && self.size + incoming as u64 > self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        for n in (1..self.backup_count).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;
        self.file = Self::open_append(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
