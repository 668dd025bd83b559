//! Configuration profiles.
//!
//! A profile names the environment-specific overlay merged on top of the
//! defaults: `local` during development, `prod` for packaged builds, or any
//! custom name with a matching `config.<name>.toml`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a profile name cannot be parsed.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("profile name must not be empty")]
    Empty,

    #[error("invalid profile name {0:?}: only ASCII letters, digits, '-' and '_' are allowed")]
    InvalidName(String),
}

/// The active configuration profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Profile {
    Local,
    Prod,
    Custom(String),
}

impl Profile {
    /// Canonical lower-case name.
    pub fn name(&self) -> &str {
        match self {
            Profile::Local => "local",
            Profile::Prod => "prod",
            Profile::Custom(name) => name,
        }
    }

    /// File holding this profile's overlay, e.g. `config.local.toml`.
    pub fn overlay_file_name(&self) -> String {
        format!("config.{}.toml", self.name())
    }
}

impl FromStr for Profile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(ProfileError::Empty);
        }
        // The name ends up in a file name, so path separators and dots are out.
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ProfileError::InvalidName(s.to_string()));
        }
        Ok(match name.as_str() {
            "local" | "dev" | "development" => Profile::Local,
            "prod" | "production" => Profile::Prod,
            _ => Profile::Custom(name),
        })
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
