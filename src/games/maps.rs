//! Map data attached to games through `map_path`.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::loader::DocumentSource;
use crate::games::Game;

/// Load `game`'s map file, if it has one, and attach its `maps` list.
///
/// - no `map_path`: nothing to do
/// - `map_path` without `score_path`: warn, game stays without maps
/// - map file unreadable, unparseable or without `maps`: error
pub fn attach_maps(source: &dyn DocumentSource, game: &mut Game) -> ConfigResult<()> {
    let Some(map_path) = game.map_path().map(|p| p.to_path_buf()) else {
        return Ok(());
    };
    if !game.has_score_path() {
        tracing::warn!(
            game_id = %game.id(),
            "Not parsing game map for game definition because it has no score_path"
        );
        return Ok(());
    }

    let mut document = source.load_document(&map_path)?;
    let maps = match document.remove("maps") {
        Some(toml::Value::Array(maps)) => maps,
        Some(_) => return Err(ConfigError::InvalidMaps { path: map_path }),
        None => return Err(ConfigError::MissingMaps { path: map_path }),
    };
    if !maps.iter().all(toml::Value::is_table) {
        return Err(ConfigError::InvalidMaps { path: map_path });
    }

    tracing::debug!(game_id = %game.id(), maps = maps.len(), "Loaded game maps");
    game.set_game_maps(maps);
    Ok(())
}
