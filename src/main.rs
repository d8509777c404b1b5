//! webtiles-conf daemon.
//!
//! Loads the server configuration and keeps it current:
//!
//! ```text
//!   SIGHUP / --watch change ──▶ full reload ──┐
//!   SIGUSR2 ─────────────────▶ title reload ──┼──▶ ConfigStore (ArcSwap<Config>)
//!   SIGTERM / SIGINT ────────▶ exit           │
//!                                             └──▶ readers take Arc<Config> snapshots
//! ```
//!
//! Any load failure, at startup or on reload, ends the process with a
//! non-zero status.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;

use webtiles_conf::config::watcher::ConfigWatcher;
use webtiles_conf::config::FileSource;
use webtiles_conf::lifecycle::{reload, signals, startup};

#[derive(Parser)]
#[command(name = "webtiles-conf")]
#[command(about = "Load and hot-reload the game server configuration", long_about = None)]
struct Cli {
    /// Primary config file (defaults to $WEBTILES_CONF, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload when the primary config file changes on disk
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let store = match startup::bootstrap(cli.config.as_deref(), Arc::new(FileSource)) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            // logging may not be installed yet
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();

    let _signals = match signals::spawn_listener(tx.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install signal handlers");
            return ExitCode::FAILURE;
        }
    };

    let _watcher = if cli.watch {
        match ConfigWatcher::new(store.path(), tx.clone()).run() {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start config watcher");
                return ExitCode::FAILURE;
            }
        }
    } else {
        None
    };
    drop(tx);

    tracing::info!("Waiting for reload signals");
    match reload::run(store, rx).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Configuration reload failed, exiting");
            ExitCode::FAILURE
        }
    }
}
