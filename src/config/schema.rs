//! Typed view of the well-known top-level keys.
//!
//! The primary document is also kept verbatim (see [`crate::config::Config::get`]),
//! so keys not modelled here still pass through untouched.
//! `janitor_commands` and `games` are read by their own builders.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::loader::Document;

/// Known settings of the primary configuration document.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Locale name; applied by the embedding server, not by this crate.
    pub locale: Option<String>,

    /// Usernames with full admin rights.
    pub server_admins: Vec<String>,

    /// Usernames with janitor rights (admins are added implicitly).
    pub server_janitors: Vec<String>,

    /// Roster of developer accounts.
    pub devteam_file: Option<PathBuf>,

    /// Grant janitor rights to every name in the developer roster.
    pub devs_are_server_janitors: bool,

    /// Recognised player titles, least to most prestigious.
    pub title_names: Vec<String>,

    /// Roster of players holding each title.
    pub player_title_file: Option<PathBuf>,

    /// Directory of supplementary game definition files.
    pub games_conf_d: Option<PathBuf>,

    /// Log sink settings.
    pub logging: LoggingSettings,
}

impl ServerSettings {
    /// Extract the typed settings from a parsed primary document.
    pub fn from_document(path: &std::path::Path, document: &Document) -> ConfigResult<Self> {
        toml::Value::Table(document.clone())
            .try_into()
            .map_err(|source| ConfigError::Settings {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Log sink configuration (the `[logging]` table).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file; stderr when unset.
    pub filename: Option<PathBuf>,

    /// Rotate the log file once it would grow past this size. 0 disables rotation.
    pub max_bytes: u64,

    /// Number of rotated files to keep.
    pub backup_count: u32,

    /// Output format: `full`, `compact`, `pretty` or `json`.
    pub format: Option<String>,

    /// strftime pattern for timestamps.
    pub datefmt: Option<String>,

    /// Minimum level, by name (`"INFO"`, `"warning"`) or number (10-50).
    pub level: Option<LogLevel>,

    /// Emit events on the `access` target.
    pub enable_access_log: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filename: None,
            max_bytes: 10 * 1000 * 1000,
            backup_count: 5,
            format: None,
            datefmt: None,
            level: None,
            enable_access_log: false,
        }
    }
}

/// A log level as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LogLevel {
    Number(i64),
    Name(String),
}

impl LogLevel {
    /// The equivalent `tracing` filter directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Number(n) if *n <= 0 => "trace",
            LogLevel::Number(n) if *n <= 10 => "debug",
            LogLevel::Number(n) if *n <= 20 => "info",
            LogLevel::Number(n) if *n <= 30 => "warn",
            LogLevel::Number(_) => "error",
            LogLevel::Name(name) => match name.to_ascii_lowercase().as_str() {
                "trace" | "notset" => "trace",
                "debug" | "debg" => "debug",
                "warn" | "warning" => "warn",
                "error" | "critical" | "fatal" => "error",
                _ => "info",
            },
        }
    }
}
