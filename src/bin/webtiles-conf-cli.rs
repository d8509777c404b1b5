use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webtiles_conf::config::{resolve_config_path, Config, FileSource};

#[derive(Parser)]
#[command(name = "webtiles-conf-cli")]
#[command(about = "Inspect the merged game server configuration", long_about = None)]
struct Cli {
    /// Primary config file (defaults to $WEBTILES_CONF, then ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and summarize it
    Check,
    /// Print the client-facing game list
    Games,
    /// Classify a username
    Whois { username: String },
    /// List janitor commands and their parameters
    Commands,
    /// Look up a map of a game
    Map { game_id: String, map_name: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webtiles_conf=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let path = resolve_config_path(cli.config.as_deref())?;
    let config = Config::load(&path, &FileSource)?;

    let output = match cli.command {
        Commands::Check => json!({
            "path": config.path().display().to_string(),
            "games": config.games().len(),
            "janitor_commands": config.janitor_commands().len(),
            "admins": config.identity().sets().admins().len(),
            "janitors": config.identity().sets().janitors().len(),
            "devteam": config.identity().devteam().len(),
            "titles": config.settings().title_names,
        }),
        Commands::Games => config.games_json()?,
        Commands::Whois { username } => json!({
            "nerd": config.get_nerd(&username),
            "is_server_admin": config.is_server_admin(&username),
            "is_server_janitor": config.is_server_janitor(&username),
        }),
        Commands::Commands => Value::Array(
            config
                .janitor_commands()
                .values()
                .map(|cmd| json!({ "id": cmd.id, "name": cmd.name, "params": cmd.params }))
                .collect(),
        ),
        Commands::Map { game_id, map_name } => match config.game_map(&game_id, &map_name) {
            Some(map) => serde_json::to_value(map)?,
            None => return Err(format!("no map '{map_name}' for game '{game_id}'").into()),
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
