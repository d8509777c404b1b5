//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use webtiles_conf::config::{Config, ConfigResult, FileSource};

/// A config tree in a temporary directory.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Absolute path of `rel` inside the fixture.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// `path(rel)` in a form that can be pasted into a TOML string.
    pub fn toml_path(&self, rel: &str) -> String {
        self.path(rel).display().to_string().replace('\\', "/")
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Write the primary config file.
    pub fn primary(&self, content: &str) -> &Self {
        self.write("config.toml", content)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("config.toml")
    }

    /// Run the load pipeline on the primary config file.
    pub fn load(&self) -> ConfigResult<Config> {
        Config::load(&self.config_path(), &FileSource)
    }
}

/// Ids of the canonical game list.
#[allow(dead_code)]
pub fn game_ids(config: &Config) -> Vec<String> {
    config
        .games()
        .games()
        .iter()
        .map(|g| g.id().to_string())
        .collect()
}
