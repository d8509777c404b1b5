//! Configuration loading for a multiplayer game web server.
//!
//! Merges the primary config file, per-game fragment files, the developer
//! roster and the player title roster into an immutable [`Config`], and
//! swaps in a fresh one on reload through [`ConfigStore`].

pub mod commands;
pub mod config;
pub mod games;
pub mod identity;
pub mod lifecycle;
pub mod observability;
pub mod roster;

pub use config::{Config, ConfigError, ConfigStore};
pub use games::{Game, GameRegistry};
pub use identity::{IdentityKind, IdentityResolver, Nerd};
