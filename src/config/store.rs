//! Merged configuration snapshots and the store that swaps them.
//!
//! # Load sequence
//! ```text
//! primary document
//!     → ServerSettings
//!     → devteam roster → IdentitySets (admins, janitors)
//!     → title roster   → IdentityResolver
//!     → janitor_commands → CommandTable
//!     → inline games + games_conf_d → GameRegistry
//!     → canonical `games` list written back into the document
//! ```
//!
//! A [`Config`] is never mutated after it is built. [`ConfigStore`] hands
//! out `Arc<Config>` snapshots and replaces the whole snapshot on reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::commands::{CommandTable, CommandTableBuilder, JanitorCommand};
use crate::config::error::ConfigResult;
use crate::config::loader::{Document, DocumentSource};
use crate::config::schema::ServerSettings;
use crate::games::{Game, GameRegistry, GameRegistryBuilder};
use crate::identity::{Identity, IdentityResolver, IdentitySets, Nerd};
use crate::roster::{Roster, RosterLoader};

/// A fully merged, immutable configuration.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    document: Document,
    settings: ServerSettings,
    identity: IdentityResolver,
    commands: CommandTable,
    games: GameRegistry,
}

impl Config {
    /// Run the whole load pipeline for the primary file at `path`.
    pub fn load(path: &Path, source: &dyn DocumentSource) -> ConfigResult<Self> {
        let document = source.load_document(path)?;
        Self::from_document(path, document, source)
    }

    /// Run the load pipeline on an already parsed primary document.
    pub fn from_document(
        path: &Path,
        mut document: Document,
        source: &dyn DocumentSource,
    ) -> ConfigResult<Self> {
        let settings = ServerSettings::from_document(path, &document)?;
        if let Some(locale) = &settings.locale {
            tracing::debug!(locale = %locale, "Locale configured");
        }

        let devteam = RosterLoader::devteam().load(source, settings.devteam_file.as_deref())?;
        let sets = IdentitySets::from_settings(&settings, &devteam);
        let titles = load_player_titles(source, &settings)?;
        let identity = IdentityResolver::new(sets, devteam, titles, settings.title_names.clone());

        let commands = CommandTableBuilder::build(document.get("janitor_commands"))?;

        let mut builder = GameRegistryBuilder::new(source);
        if let Some(games) = document.get("games") {
            builder.add_games(games, path)?;
        }
        if let Some(dir) = &settings.games_conf_d {
            builder.add_fragment_dir(dir)?;
        }
        let games = builder.finish();
        document.insert("games".to_string(), games.to_value());

        tracing::info!(
            path = %path.display(),
            games = games.len(),
            janitor_commands = commands.len(),
            admins = identity.sets().admins().len(),
            janitors = identity.sets().janitors().len(),
            devteam = identity.devteam().len(),
            "Configuration loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            document,
            settings,
            identity,
            commands,
            games,
        })
    }

    /// A copy of this configuration with the title roster re-read from disk.
    pub fn with_reloaded_titles(&self, source: &dyn DocumentSource) -> ConfigResult<Self> {
        let titles = load_player_titles(source, &self.settings)?;
        Ok(Self {
            identity: self.identity.with_titles(titles),
            ..self.clone()
        })
    }

    /// Path of the primary config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Typed settings.
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// The merged document, including the canonical `games` list.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Raw lookup of any top-level key.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.document.get(key)
    }

    /// Raw lookup with a fallback.
    pub fn get_or(&self, key: &str, default: toml::Value) -> toml::Value {
        self.document.get(key).cloned().unwrap_or(default)
    }

    pub fn identity(&self) -> &IdentityResolver {
        &self.identity
    }

    pub fn is_server_admin(&self, username: &str) -> bool {
        self.identity.is_server_admin(username)
    }

    pub fn is_server_janitor(&self, username: &str) -> bool {
        self.identity.is_server_janitor(username)
    }

    pub fn classify(&self, username: &str) -> Identity {
        self.identity.classify(username)
    }

    pub fn get_nerd(&self, username: &str) -> Nerd {
        self.identity.get_nerd(username)
    }

    pub fn get_devname(&self, username: &str) -> Option<&str> {
        self.identity.get_devname(username)
    }

    pub fn player_title(&self, username: &str) -> Option<&str> {
        self.identity.player_title(username)
    }

    pub fn janitor_commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn janitor_command(&self, id: &str) -> Option<&JanitorCommand> {
        self.commands.get(id)
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn game(&self, id: &str) -> Option<&Game> {
        self.games.get(id)
    }

    pub fn get_game(&self, version: &str, mode: &str) -> Option<&Game> {
        self.games.get_game(version, mode)
    }

    pub fn game_map(&self, game_id: &str, map_name: &str) -> Option<&toml::Table> {
        self.games.game_map(game_id, map_name)
    }

    /// The canonical game list as sent to web clients.
    pub fn games_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.games.games())
    }
}

/// Title roster, loaded only when both `title_names` and `player_title_file` are set.
fn load_player_titles(source: &dyn DocumentSource, settings: &ServerSettings) -> ConfigResult<Roster> {
    match &settings.player_title_file {
        Some(path) if !settings.title_names.is_empty() => {
            RosterLoader::titles().load(source, Some(path.as_path()))
        }
        _ => Ok(Roster::default()),
    }
}

/// Owns the live configuration and replaces it atomically on reload.
pub struct ConfigStore {
    path: PathBuf,
    source: Arc<dyn DocumentSource>,
    current: ArcSwap<Config>,
}

impl ConfigStore {
    /// Load the configuration at `path`.
    pub fn open(path: impl Into<PathBuf>, source: Arc<dyn DocumentSource>) -> ConfigResult<Self> {
        let path = path.into();
        let config = Config::load(&path, source.as_ref())?;
        Ok(Self::from_config(config, source))
    }

    /// Wrap an already loaded configuration.
    pub fn from_config(config: Config, source: Arc<dyn DocumentSource>) -> Self {
        Self {
            path: config.path().to_path_buf(),
            source,
            current: ArcSwap::from_pointee(config),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Rebuild everything from disk and swap it in.
    ///
    /// On error the previous snapshot stays in place.
    pub fn reload(&self) -> ConfigResult<Arc<Config>> {
        tracing::info!(path = %self.path.display(), "Reloading configuration");
        let config = Arc::new(Config::load(&self.path, self.source.as_ref())?);
        self.current.store(Arc::clone(&config));
        Ok(config)
    }

    /// Re-read only the player title roster and swap in the result.
    pub fn reload_player_titles(&self) -> ConfigResult<Arc<Config>> {
        tracing::info!("Reloading player titles");
        let config = Arc::new(self.current().with_reloaded_titles(self.source.as_ref())?);
        self.current.store(Arc::clone(&config));
        Ok(config)
    }
}
