//! Abstraction over where configuration profiles come from.

use std::path::PathBuf;

use thiserror::Error;
use xtools_core::Value;

use crate::domain::Profile;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A parsed value has no counterpart in the value graph.
    #[error("cannot convert config value at `{key}`: {reason}")]
    Convert { key: String, reason: String },
}

/// Loads the default configuration and per-profile overlays.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource {
    /// Loads the defaults every profile starts from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the defaults cannot be read or parsed.
    fn load_defaults(&self) -> Result<Value, ConfigError>;

    /// Loads the overlay for `profile`, or `Ok(None)` when the profile has
    /// no overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing overlay cannot be read or parsed.
    fn load_overlay(&self, profile: &Profile) -> Result<Option<Value>, ConfigError>;
}
