//! Game definitions.
//!
//! # Data Flow
//! ```text
//! primary config `games` (declared order)
//!     → registry.rs (register, first id wins)
//! games_conf_d/*.toml (lexicographic order)
//!     → registry.rs (register, appended to canonical list)
//! each newly registered game
//!     → maps.rs (attach `game_maps` from `map_path`)
//! ```
//!
//! # Design Decisions
//! - A game keeps every field of its definition; only `game_maps` is added
//! - Lookup by id is O(1); client output keeps declaration order

pub mod maps;
pub mod registry;

use std::path::Path;

use serde::{Serialize, Serializer};

use crate::config::error::{ConfigError, ConfigResult};

pub use registry::{DuplicateGame, GameRegistry, GameRegistryBuilder};

/// Key under which parsed map data is attached to a game.
pub const GAME_MAPS_KEY: &str = "game_maps";

/// One game definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: String,
    fields: toml::Table,
}

impl Game {
    /// Validate a raw definition taken from `origin`.
    pub fn from_value(value: &toml::Value, origin: &Path) -> ConfigResult<Self> {
        let invalid = |reason: &str| ConfigError::InvalidGame {
            origin: origin.to_path_buf(),
            reason: reason.to_string(),
        };
        let fields = value
            .as_table()
            .ok_or_else(|| invalid("game definitions must be tables"))?;
        let id = fields
            .get("id")
            .and_then(toml::Value::as_str)
            .ok_or_else(|| invalid("game definition has no string id"))?;
        if fields.get("map_path").is_some_and(|p| !p.is_str()) {
            return Err(invalid(&format!("map_path of game '{id}' must be a string")));
        }
        Ok(Self {
            id: id.to_string(),
            fields: fields.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Option<&str> {
        self.get_str("mode")
    }

    pub fn version(&self) -> Option<&str> {
        self.get_str("version")
    }

    pub fn map_path(&self) -> Option<&Path> {
        self.get_str("map_path").map(Path::new)
    }

    pub fn has_score_path(&self) -> bool {
        self.fields.contains_key("score_path")
    }

    /// Any field of the definition.
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.fields.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(toml::Value::as_str)
    }

    pub fn fields(&self) -> &toml::Table {
        &self.fields
    }

    /// Parsed map entries, if map data was loaded for this game.
    pub fn game_maps(&self) -> Option<&[toml::Value]> {
        self.fields
            .get(GAME_MAPS_KEY)
            .and_then(toml::Value::as_array)
            .map(Vec::as_slice)
    }

    /// The first map named `name`.
    pub fn map(&self, name: &str) -> Option<&toml::Table> {
        self.game_maps()?
            .iter()
            .filter_map(toml::Value::as_table)
            .find(|m| m.get("name").and_then(toml::Value::as_str) == Some(name))
    }

    pub(crate) fn set_game_maps(&mut self, maps: Vec<toml::Value>) {
        self.fields
            .insert(GAME_MAPS_KEY.to_string(), toml::Value::Array(maps));
    }

    /// The definition as a document value.
    pub fn to_value(&self) -> toml::Value {
        toml::Value::Table(self.fields.clone())
    }
}

impl Serialize for Game {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
