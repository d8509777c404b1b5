//! End-to-end tests of the load pipeline against files on disk.

use std::collections::BTreeSet;
use std::sync::Arc;

use webtiles_conf::config::{ConfigStore, FileSource};
use webtiles_conf::IdentityKind;

mod common;

use common::{game_ids, Fixture};

#[test]
fn test_roster_reload_is_stable() {
    let fx = Fixture::new();
    fx.write("devteam.txt", "Gammafunk gf\n").primary(&format!(
        "devteam_file = \"{}\"\n",
        fx.toml_path("devteam.txt")
    ));

    let first = fx.load().unwrap();
    let second = fx.load().unwrap();
    assert_eq!(first.identity().devteam(), second.identity().devteam());

    fx.write("devteam.txt", "Gammafunk gf\nEbering eb\n");
    let third = fx.load().unwrap();
    let devteam = third.identity().devteam();
    assert_eq!(devteam.len(), 2);
    assert_eq!(devteam.entries()[0], first.identity().devteam().entries()[0]);
    assert_eq!(third.get_devname("EB"), Some("Ebering"));
}

#[test]
fn test_janitors_are_superset_of_admins_and_devs() {
    let fx = Fixture::new();
    fx.write("devteam.txt", "Gammafunk GF_alt\nEbering\n").primary(&format!(
        r#"
        server_admins = ["Root", "Other"]
        server_janitors = ["Janny"]
        devteam_file = "{}"
        devs_are_server_janitors = true
        "#,
        fx.toml_path("devteam.txt")
    ));

    let config = fx.load().unwrap();
    let sets = config.identity().sets();
    assert!(sets.janitors().is_superset(sets.admins()));
    for name in ["gammafunk", "gf_alt", "ebering", "janny", "root", "other"] {
        assert!(config.is_server_janitor(name), "{name} should be a janitor");
    }
    assert!(!config.is_server_admin("gammafunk"));
}

#[test]
fn test_janitor_set_without_janitor_list() {
    let fx = Fixture::new();
    fx.primary("server_admins = [\"Root\"]\n");

    let config = fx.load().unwrap();
    assert!(config.is_server_janitor("ROOT"));
    assert!(!config.is_server_janitor("nobody"));
}

#[test]
fn test_inline_duplicate_game_keeps_first() {
    let fx = Fixture::new();
    fx.primary(
        r#"
        [[games]]
        id = "a"
        name = "first"

        [[games]]
        id = "a"
        name = "second"
        "#,
    );

    let config = fx.load().unwrap();
    assert_eq!(game_ids(&config), vec!["a"]);
    let a = config.game("a").unwrap();
    assert_eq!(a.get("name").and_then(toml::Value::as_str), Some("first"));
}

#[test]
fn test_primary_definition_beats_fragments() {
    let fx = Fixture::new();
    fx.write("games.d/0-early.toml", "[[games]]\nid = \"a\"\nname = \"fragment\"\n")
        .primary(&format!(
            "games_conf_d = \"{}\"\n[[games]]\nid = \"a\"\nname = \"primary\"\n",
            fx.toml_path("games.d")
        ));

    let config = fx.load().unwrap();
    assert_eq!(game_ids(&config), vec!["a"]);
    let a = config.game("a").unwrap();
    assert_eq!(a.get("name").and_then(toml::Value::as_str), Some("primary"));
}

#[test]
fn test_title_precedence() {
    let fx = Fixture::new();
    fx.write("titles.txt", "slayer alice bob\nchampion alice\n")
        .primary(&format!(
            "title_names = [\"Slayer\", \"Champion\"]\nplayer_title_file = \"{}\"\n",
            fx.toml_path("titles.txt")
        ));

    let config = fx.load().unwrap();
    assert_eq!(
        config.classify("alice").kind,
        IdentityKind::Title("Champion".to_string())
    );
    assert_eq!(config.get_nerd("BOB").kind, "Slayer");
    assert_eq!(config.get_nerd("carol").kind, "normal");
}

#[test]
fn test_classification_precedence_across_sources() {
    let fx = Fixture::new();
    fx.write("devteam.txt", "Root\nGammafunk\n")
        .write("titles.txt", "champion root gammafunk carol\n")
        .primary(&format!(
            r#"
            server_admins = ["root"]
            devteam_file = "{}"
            title_names = ["Champion"]
            player_title_file = "{}"
            "#,
            fx.toml_path("devteam.txt"),
            fx.toml_path("titles.txt")
        ));

    let config = fx.load().unwrap();
    assert_eq!(config.get_nerd("Root").kind, "admins");
    assert_eq!(config.get_nerd("root").devname, None);
    let dev = config.get_nerd("gammafunk");
    assert_eq!(dev.kind, "devteam");
    assert_eq!(dev.devname.as_deref(), Some("Gammafunk"));
    assert_eq!(config.get_nerd("carol").kind, "Champion");
}

#[test]
fn test_command_params() {
    let fx = Fixture::new();
    fx.primary(
        r#"
        [[janitor_commands]]
        id = "ban"
        name = "Ban"
        action = "ban"
        argument = "ban {target} for {reason}"

        [[janitor_commands]]
        id = "list"
        name = "List"
        action = "list"
        argument = "list"
        "#,
    );

    let config = fx.load().unwrap();
    let expected: BTreeSet<String> = ["target", "reason"].iter().map(|s| s.to_string()).collect();
    assert_eq!(config.janitor_command("ban").unwrap().params, expected);
    assert!(config.janitor_command("list").unwrap().params.is_empty());
}

#[test]
fn test_case_insensitive_admin_check() {
    let fx = Fixture::new();
    fx.primary("server_admins = [\"AdminName\"]\n");

    let config = fx.load().unwrap();
    for name in ["AdminName", "adminname", "ADMINNAME", "aDmInNaMe"] {
        assert!(config.is_server_admin(name));
    }
    assert!(!config.is_server_admin("admin"));
}

#[test]
fn test_fragment_order_is_lexicographic() {
    let fx = Fixture::new();
    fx.write("games.d/b.toml", "[[games]]\nid = \"b1\"\n[[games]]\nid = \"b2\"\n")
        .write("games.d/a.toml", "[[games]]\nid = \"a1\"\n")
        .primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("games.d")));

    let config = fx.load().unwrap();
    assert_eq!(game_ids(&config), vec!["a1", "b1", "b2"]);

    // fragment games are visible to clients too
    let games = config.games_json().unwrap();
    let ids: Vec<&str> = games
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a1", "b1", "b2"]);
}

#[test]
fn test_map_attachment() {
    let fx = Fixture::new();
    fx.write("maps/sprint.toml", "[[maps]]\nname = \"Lair\"\ndescription = \"Snakes\"\n")
        .primary(&format!(
            r#"
            [[games]]
            id = "sprint"
            mode = "sprint"
            version = "trunk"
            score_path = "scores"
            map_path = "{}"
            "#,
            fx.toml_path("maps/sprint.toml")
        ));

    let config = fx.load().unwrap();
    let lair = config.game_map("sprint", "Lair").unwrap();
    assert_eq!(lair.get("description").and_then(toml::Value::as_str), Some("Snakes"));
    assert!(config.game_map("sprint", "Nope").is_none());
    assert!(config.game_map("missing-game", "Lair").is_none());

    let sprint = config.get_game("trunk", "sprint").unwrap();
    assert_eq!(sprint.game_maps().map(<[toml::Value]>::len), Some(1));
}

#[test]
fn test_store_reload_picks_up_new_fragment() {
    let fx = Fixture::new();
    fx.primary(&format!("games_conf_d = \"{}\"\n", fx.toml_path("games.d")))
        .write("games.d/a.toml", "[[games]]\nid = \"a\"\n");

    let store = ConfigStore::open(fx.config_path(), Arc::new(FileSource)).unwrap();
    let before = store.current();
    assert_eq!(before.games().len(), 1);

    fx.write("games.d/b.toml", "[[games]]\nid = \"b\"\n");
    store.reload().unwrap();

    assert_eq!(store.current().games().len(), 2);
    assert_eq!(before.games().len(), 1);
}
