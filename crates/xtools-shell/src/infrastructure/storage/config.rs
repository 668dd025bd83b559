//! TOML-based configuration profiles read from a config directory.
//!
//! The directory holds one defaults file plus optional per-profile overlays:
//!
//! ```text
//! config/
//! ├── config.default.toml   (required)
//! ├── config.local.toml     (overlay for the `local` profile)
//! └── config.prod.toml      (overlay for the `prod` profile)
//! ```
//!
//! # Why not deserialize straight into structs? (for beginners)
//!
//! Profiles carry keys the shell itself never looks at (renderer options,
//! middleware settings, feature flags).  Deserializing into a fixed struct
//! would silently drop them.  Instead each file is parsed into a generic
//! `toml::Table` and converted into an `xtools_core::Value` graph by
//! [`super::convert::table_to_value`], so every key survives the merge and
//! only [`crate::domain::ShellSettings`] decides which ones matter.

use std::path::{Path, PathBuf};

use tracing::debug;
use xtools_core::Value;

use super::convert::table_to_value;
use crate::application::config_source::{ConfigError, ConfigSource};
use crate::domain::Profile;

/// File name of the defaults every profile starts from.
pub const DEFAULTS_FILE_NAME: &str = "config.default.toml";

/// Reads profiles from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    dir: PathBuf,
}

impl FileConfigSource {
    /// Creates a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the defaults file.
    pub fn defaults_path(&self) -> PathBuf {
        self.dir.join(DEFAULTS_FILE_NAME)
    }

    /// Full path of the overlay file for `profile`.
    pub fn overlay_path(&self, profile: &Profile) -> PathBuf {
        self.dir.join(profile.overlay_file_name())
    }
}

impl ConfigSource for FileConfigSource {
    /// Loads `config.default.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file is missing or unreadable,
    /// [`ConfigError::Parse`] if the TOML is malformed.
    fn load_defaults(&self) -> Result<Value, ConfigError> {
        let path = self.defaults_path();
        match read_table(&path)? {
            Some(table) => table_to_value(&table),
            None => Err(ConfigError::Io {
                path,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }

    /// Loads `config.<profile>.toml`, returning `Ok(None)` when the profile
    /// has no overlay file.
    fn load_overlay(&self, profile: &Profile) -> Result<Option<Value>, ConfigError> {
        let path = self.overlay_path(profile);
        match read_table(&path)? {
            Some(table) => table_to_value(&table).map(Some),
            None => {
                debug!(profile = %profile, path = %path.display(), "no overlay file for profile");
                Ok(None)
            }
        }
    }
}

/// Reads and parses a TOML file, returning `Ok(None)` if it does not exist.
fn read_table(path: &Path) -> Result<Option<toml::Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let table = toml::from_str::<toml::Table>(&content).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            debug!(path = %path.display(), keys = table.len(), "parsed config file");
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
