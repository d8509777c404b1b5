//! Game registry: merges inline and fragment game definitions.
//!
//! # Responsibilities
//! - Register games from the primary config, in declared order
//! - Register games from `games_conf_d/*.toml`, in lexicographic path order
//! - Reject duplicate ids (first definition wins, later ones are dropped)
//! - Answer lookups by id and by (version, mode)
//!
//! # Design Decisions
//! - Duplicates are reported through [`DuplicateGame`], not a panic or a fatal error
//! - A missing fragment directory or a fragment without `games` is skipped with a warning
//! - A fragment that cannot be read or parsed fails the load

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::loader::DocumentSource;
use crate::games::{maps, Game};

/// Extension of game fragment files.
pub const FRAGMENT_EXTENSION: &str = "toml";

/// A game id was registered twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate game id '{id}'")]
pub struct DuplicateGame {
    pub id: String,
}

/// Registered games, keyed by id and kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: Vec<Game>,
    index: HashMap<String, usize>,
}

impl GameRegistry {
    /// Add `game` unless its id is already registered.
    pub fn register(&mut self, game: Game) -> Result<&mut Game, DuplicateGame> {
        if self.index.contains_key(game.id()) {
            return Err(DuplicateGame {
                id: game.id().to_string(),
            });
        }
        let slot = self.games.len();
        self.index.insert(game.id().to_string(), slot);
        self.games.push(game);
        Ok(&mut self.games[slot])
    }

    pub fn get(&self, id: &str) -> Option<&Game> {
        self.index.get(id).map(|&i| &self.games[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Games in canonical (registration) order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// The first registered game with this `version` and `mode`.
    ///
    /// Games lacking either field are never matched.
    pub fn get_game(&self, version: &str, mode: &str) -> Option<&Game> {
        self.games
            .iter()
            .find(|g| g.mode() == Some(mode) && g.version() == Some(version))
    }

    /// The first map named `map_name` of game `game_id`.
    pub fn game_map(&self, game_id: &str, map_name: &str) -> Option<&toml::Table> {
        self.get(game_id)?.map(map_name)
    }

    /// The canonical game list as a document value.
    pub fn to_value(&self) -> toml::Value {
        toml::Value::Array(self.games.iter().map(Game::to_value).collect())
    }
}

/// Drives registration of games from every source.
pub struct GameRegistryBuilder<'a> {
    source: &'a dyn DocumentSource,
    registry: GameRegistry,
}

impl<'a> GameRegistryBuilder<'a> {
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self {
            source,
            registry: GameRegistry::default(),
        }
    }

    /// Register every game in a `games` list read from `origin`.
    pub fn add_games(&mut self, games: &toml::Value, origin: &Path) -> ConfigResult<()> {
        let games = games.as_array().ok_or_else(|| ConfigError::InvalidGame {
            origin: origin.to_path_buf(),
            reason: "games must be a list".to_string(),
        })?;
        for value in games {
            let game = Game::from_value(value, origin)?;
            match self.registry.register(game) {
                Ok(game) => {
                    maps::attach_maps(self.source, game)?;
                    tracing::info!(game_id = %game.id(), "Loaded game");
                }
                Err(DuplicateGame { id }) => {
                    tracing::warn!(
                        game_id = %id,
                        origin = %origin.display(),
                        "Skipping duplicate game definition"
                    );
                }
            }
        }
        Ok(())
    }

    /// Register games from every fragment file in `dir`.
    pub fn add_fragment_dir(&mut self, dir: &Path) -> ConfigResult<()> {
        if !self.source.is_dir(dir) {
            tracing::warn!(path = %dir.display(), "games_conf_d is not a directory, ignoring");
            return Ok(());
        }

        for path in fragment_files(self.source.list_dir(dir)?) {
            if !self.source.is_file(&path) {
                tracing::warn!(path = %path.display(), "Skipping non-file");
                continue;
            }
            tracing::debug!(path = %path.display(), "Loading game config file");
            let document = self.source.load_document(&path)?;
            match document.get("games") {
                Some(games) => self.add_games(games, &path)?,
                None => tracing::warn!(
                    path = %path.display(),
                    "No games specifications found in game config file, skipping"
                ),
            }
        }
        Ok(())
    }

    pub fn finish(self) -> GameRegistry {
        self.registry
    }
}

/// Fragment candidates in lexicographic path order. Hidden files are ignored.
fn fragment_files(entries: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = entries
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == FRAGMENT_EXTENSION))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !n.starts_with('.'))
        })
        .collect();
    paths.sort();
    paths
}
