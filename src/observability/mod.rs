//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (path, game_id, ...)
//!
//! logging.rs routes them to:
//!     → stderr, or a size-rotated log file
//! ```
//!
//! # Design Decisions
//! - The subscriber is installed from the primary document's `[logging]`
//!   table before rosters, commands and games are loaded
//! - A reload does not reconfigure logging; restart to change the sink

pub mod logging;
