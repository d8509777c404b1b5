//! Configuration loading from disk.
//!
//! Only this module touches the file system. Everything downstream works
//! on parsed [`Document`]s handed out by a [`DocumentSource`].

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, ConfigResult};

/// A parsed TOML document.
pub type Document = toml::Table;

/// Environment variable naming the primary config file.
pub const CONFIG_ENV_VAR: &str = "WEBTILES_CONF";

/// File name searched for when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Structured document reader used by the load pipeline.
///
/// Implementations must release every file handle before returning,
/// including on parse failure.
pub trait DocumentSource: Send + Sync {
    /// Read a whole file as text.
    fn read_text(&self, path: &Path) -> ConfigResult<String>;

    /// Returns true if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns true if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// List the entries of a directory, in no particular order.
    fn list_dir(&self, dir: &Path) -> ConfigResult<Vec<PathBuf>>;

    /// Read and parse a TOML document.
    fn load_document(&self, path: &Path) -> ConfigResult<Document> {
        let content = self.read_text(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// [`DocumentSource`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl DocumentSource for FileSource {
    fn read_text(&self, path: &Path) -> ConfigResult<String> {
        fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, dir: &Path) -> ConfigResult<Vec<PathBuf>> {
        let io_err = |source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            paths.push(entry.map_err(io_err)?.path());
        }
        Ok(paths)
    }
}

/// Locate the primary configuration file.
///
/// Search order:
/// 1. `explicit` (the `--config` flag)
/// 2. the `WEBTILES_CONF` environment variable
/// 3. `./config.toml`
/// 4. `config.toml` next to the running executable
pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_from(explicit, std::env::var_os(CONFIG_ENV_VAR), exe_dir)
}

fn resolve_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    exe_dir: Option<PathBuf>,
) -> ConfigResult<PathBuf> {
    let path = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        PathBuf::from(value)
    } else {
        let local = Path::new(".").join(DEFAULT_CONFIG_FILE);
        match exe_dir {
            Some(dir) if !local.exists() => dir.join(DEFAULT_CONFIG_FILE),
            _ => local,
        }
    };

    if path.exists() {
        return Ok(path);
    }

    let mut sample = path.clone().into_os_string();
    sample.push(".sample");
    let hint = if Path::new(&sample).exists() {
        format!(
            " Maybe copy {} to {}.",
            Path::new(&sample).display(),
            path.display()
        )
    } else {
        String::new()
    };
    Err(ConfigError::NotFound { path, hint })
}
