//! Domain types for the desktop shell.
//!
//! This module has no file-system or environment access.  It defines which
//! configuration profile is active ([`Profile`]) and the typed view of the
//! settings the shell acts on ([`ShellSettings`]), read from an already
//! resolved value graph.

pub mod profile;
pub mod settings;

pub use profile::{Profile, ProfileError};
pub use settings::{LoggerSettings, ServerSettings, SettingsError, ShellSettings, WindowSettings};
