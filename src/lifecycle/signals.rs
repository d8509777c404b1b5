//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGHUP, SIGUSR2, SIGTERM, SIGINT)
//! - Translate signals to [`LifecycleEvent`]s
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a config reload, not shutdown
//! - On non-Unix platforms only Ctrl+C is supported

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lifecycle::LifecycleEvent;

/// Spawn a task forwarding OS signals to `events`.
///
/// The task ends after forwarding a shutdown request or when the receiver is dropped.
#[cfg(unix)]
pub fn spawn_listener(events: mpsc::UnboundedSender<LifecycleEvent>) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    let mut user2 = signal(SignalKind::user_defined2())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    Ok(tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                _ = hangup.recv() => LifecycleEvent::Reload,
                _ = user2.recv() => LifecycleEvent::ReloadTitles,
                _ = terminate.recv() => LifecycleEvent::Shutdown,
                _ = interrupt.recv() => LifecycleEvent::Shutdown,
            };
            tracing::debug!(?event, "Signal received");
            if events.send(event).is_err() || event == LifecycleEvent::Shutdown {
                break;
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_listener(events: mpsc::UnboundedSender<LifecycleEvent>) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Ctrl+C received");
            let _ = events.send(LifecycleEvent::Shutdown);
        }
    }))
}
