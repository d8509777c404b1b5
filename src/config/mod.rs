//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.toml (+ games_conf_d/*.toml, roster files, map files)
//!     → loader.rs (DocumentSource: read & parse)
//!     → schema.rs (typed ServerSettings)
//!     → store.rs (merge into an immutable Config)
//!     → shared via Arc<Config> snapshots
//!
//! On reload signal (SIGHUP, or watcher.rs detecting a change):
//!     → store.rs runs the full pipeline again
//!     → atomic swap of Arc<Config>
//!     → readers holding the old snapshot are unaffected
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a full reload
//! - Known keys are typed; everything else stays reachable through `Config::get`
//! - Load errors are returned, never turned into a process exit here

pub mod error;
pub mod loader;
pub mod schema;
pub mod store;
pub mod watcher;

pub use error::{ConfigError, ConfigResult};
pub use loader::{resolve_config_path, Document, DocumentSource, FileSource};
pub use schema::{LogLevel, LoggingSettings, ServerSettings};
pub use store::{Config, ConfigStore};
