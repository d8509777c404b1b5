//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config path → parse primary document → init logging → full load
//!
//! Signals (signals.rs) and the file watcher:
//!     SIGHUP / config change → LifecycleEvent::Reload
//!     SIGUSR2                → LifecycleEvent::ReloadTitles
//!     SIGTERM / SIGINT       → LifecycleEvent::Shutdown
//!
//! Reload loop (reload.rs):
//!     LifecycleEvent → ConfigStore::reload / reload_player_titles / exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any load error, at startup or on reload, ends the process
//! - Events are funnelled through one channel so reloads never overlap

pub mod reload;
pub mod signals;
pub mod startup;

/// Requests handled by the reload loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Rebuild the whole configuration.
    Reload,
    /// Re-read the player title roster only.
    ReloadTitles,
    /// Stop serving.
    Shutdown,
}
