//! Configuration file watcher for hot reload.
//!
//! The watcher never loads anything itself: it turns file changes into
//! [`LifecycleEvent::Reload`] requests so every reload goes through
//! [`ConfigStore::reload`](crate::config::ConfigStore::reload).

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::LifecycleEvent;

/// Watches the primary config file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    events: mpsc::UnboundedSender<LifecycleEvent>,
}

impl ConfigWatcher {
    /// Create a watcher that reports changes of `path` on `events`.
    pub fn new(path: &Path, events: mpsc::UnboundedSender<LifecycleEvent>) -> Self {
        Self {
            path: path.to_path_buf(),
            events,
        }
    }

    /// Start watching. The returned handle must be kept alive.
    ///
    /// The parent directory is watched so that editors replacing the file
    /// (write to temp, rename over) are still noticed.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.events.clone();
        let file_name = self.path.file_name().map(|n| n.to_os_string());
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        tracing::info!("Config file change detected, requesting reload");
                        let _ = tx.send(LifecycleEvent::Reload);
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.path.display(), "Config watcher started");
        Ok(watcher)
    }
}
