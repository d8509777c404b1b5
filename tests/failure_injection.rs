//! Failure injection: which broken inputs abort a load and which are skipped.

use webtiles_conf::config::ConfigError;

mod common;

use common::{game_ids, Fixture};

#[test]
fn test_unparseable_primary_is_fatal() {
    let fx = Fixture::new();
    fx.primary("server_admins = [\n");
    assert!(matches!(fx.load(), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_primary_is_fatal() {
    let fx = Fixture::new();
    assert!(matches!(fx.load(), Err(ConfigError::Io { .. })));
}

#[test]
fn test_missing_devteam_file_is_fatal() {
    let fx = Fixture::new();
    fx.primary(&format!("devteam_file = \"{}\"\n", fx.toml_path("nope.txt")));
    assert!(matches!(fx.load(), Err(ConfigError::Io { .. })));
}

#[test]
fn test_missing_title_file_is_fatal() {
    let fx = Fixture::new();
    fx.primary(&format!(
        "title_names = [\"Slayer\"]\nplayer_title_file = \"{}\"\n",
        fx.toml_path("nope.txt")
    ));
    assert!(matches!(fx.load(), Err(ConfigError::Io { .. })));
}

#[test]
fn test_command_without_required_field_is_fatal() {
    let fx = Fixture::new();
    fx.primary(
        r#"
        [[janitor_commands]]
        name = "Ban"
        action = "ban"
        argument = "{target}"
        "#,
    );
    let err = fx.load().unwrap_err();
    assert!(matches!(err, ConfigError::MissingCommandField { field: "id" }));
    assert!(err.to_string().contains("id"));
}

#[test]
fn test_broken_fragment_is_fatal() {
    let fx = Fixture::new();
    fx.write("games.d/a.toml", "[[games]]\nid = \n")
        .primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("games.d")));
    assert!(matches!(fx.load(), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_map_file_without_maps_is_fatal() {
    let fx = Fixture::new();
    fx.write("maps.toml", "name = \"not a map list\"\n").primary(&format!(
        "[[games]]\nid = \"a\"\nscore_path = \"s\"\nmap_path = \"{}\"\n",
        fx.toml_path("maps.toml")
    ));
    assert!(matches!(fx.load(), Err(ConfigError::MissingMaps { .. })));
}

#[test]
fn test_game_without_id_is_fatal() {
    let fx = Fixture::new();
    fx.primary("[[games]]\nname = \"anonymous\"\n");
    assert!(matches!(fx.load(), Err(ConfigError::InvalidGame { .. })));
}

#[test]
fn test_games_conf_d_not_a_directory_is_skipped() {
    let fx = Fixture::new();
    fx.write("games.d", "i am a file").primary(&format!(
        "games_conf_d = \"{}\"\n[[games]]\nid = \"inline\"\n",
        fx.toml_path("games.d")
    ));

    let config = fx.load().unwrap();
    assert_eq!(game_ids(&config), vec!["inline"]);
}

#[test]
fn test_games_conf_d_missing_is_skipped() {
    let fx = Fixture::new();
    fx.primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("absent.d")));
    assert!(fx.load().unwrap().games().is_empty());
}

#[test]
fn test_fragment_without_games_is_skipped() {
    let fx = Fixture::new();
    fx.write("games.d/a.toml", "comment = \"empty\"\n")
        .write("games.d/b.toml", "[[games]]\nid = \"b\"\n")
        .primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("games.d")));
    assert_eq!(game_ids(&fx.load().unwrap()), vec!["b"]);
}

#[test]
fn test_fragment_duplicate_is_skipped() {
    let fx = Fixture::new();
    fx.write("games.d/a.toml", "[[games]]\nid = \"x\"\nname = \"a\"\n")
        .write("games.d/b.toml", "[[games]]\nid = \"x\"\nname = \"b\"\n[[games]]\nid = \"y\"\n")
        .primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("games.d")));

    let config = fx.load().unwrap();
    assert_eq!(game_ids(&config), vec!["x", "y"]);
    let x = config.game("x").unwrap();
    assert_eq!(x.get("name").and_then(toml::Value::as_str), Some("a"));
}

#[test]
fn test_map_path_without_score_path_is_skipped() {
    let fx = Fixture::new();
    fx.primary(&format!(
        "[[games]]\nid = \"a\"\nmap_path = \"{}\"\n",
        fx.toml_path("never-read.toml")
    ));

    let config = fx.load().unwrap();
    assert!(config.game("a").unwrap().game_maps().is_none());
    assert!(config.game_map("a", "Lair").is_none());
}
