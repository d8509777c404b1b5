//! Reload loop: applies lifecycle events to the config store.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{ConfigResult, ConfigStore};
use crate::lifecycle::LifecycleEvent;

/// Process events until shutdown is requested or every sender is gone.
///
/// A failed reload is returned to the caller, which is expected to exit;
/// the store still holds the last good snapshot at that point.
pub async fn run(
    store: Arc<ConfigStore>,
    mut events: mpsc::UnboundedReceiver<LifecycleEvent>,
) -> ConfigResult<()> {
    while let Some(event) = events.recv().await {
        match event {
            LifecycleEvent::Reload => {
                let config = store.reload()?;
                tracing::info!(games = config.games().len(), "Configuration reloaded");
            }
            LifecycleEvent::ReloadTitles => {
                let config = store.reload_player_titles()?;
                tracing::info!(titles = config.identity().titles().len(), "Player titles reloaded");
            }
            LifecycleEvent::Shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
        }
    }
    Ok(())
}
