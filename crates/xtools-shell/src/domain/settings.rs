//! Typed view of the settings the shell acts on.
//!
//! The resolved configuration is an untyped value graph: anything the
//! profiles contain is kept, whether or not the shell understands it.
//! [`ShellSettings::from_value`] reads the handful of keys the shell itself
//! needs (window geometry, logger, embedded servers) and checks their kinds.
//!
//! Every key except the window title has a default matching the bundled
//! `config.default.toml`, so a sparse profile still yields usable settings.

use serde::Serialize;
use thiserror::Error;
use xtools_core::{Map, Value, ValueKind};

/// Errors raised while reading typed settings from a value graph.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    /// A required key is absent.
    #[error("missing required setting `{0}`")]
    Missing(String),

    /// A key holds a value of the wrong kind or out of range.
    #[error("setting `{path}` must be {expected}, found {found}")]
    WrongKind {
        path: String,
        expected: &'static str,
        found: String,
    },
}

/// Main window geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
}

/// An embedded server (HTTP or socket).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerSettings {
    pub enable: bool,
    pub host: String,
    pub port: u16,
}

/// Application log settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggerSettings {
    pub level: String,
    pub app_log_name: String,
}

/// Everything the shell reads from the resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellSettings {
    pub open_dev_tools: bool,
    pub window: WindowSettings,
    pub logger: LoggerSettings,
    pub http_server: ServerSettings,
    pub socket_server: ServerSettings,
}

impl ShellSettings {
    /// Reads the shell settings from a resolved configuration graph.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] if `windows_option.title` is absent
    /// and [`SettingsError::WrongKind`] if any known key holds the wrong kind
    /// of value (including a root that is not a map, or a port outside
    /// `0..=65535`).
    pub fn from_value(config: &Value) -> Result<Self, SettingsError> {
        let root = match config {
            Value::Map(map) => Section {
                name: "",
                map: Some(map.clone()),
            },
            other => return Err(wrong_kind("<root>", "a map", other.kind())),
        };

        let window = root.section("windows_option")?;
        let logger = root.section("logger")?;
        let http = root.section("http_server")?;
        let socket = root.section("socket_server")?;

        Ok(Self {
            open_dev_tools: root.flag("open_dev_tools", false)?,
            window: WindowSettings {
                title: window.required_text("title")?,
                width: window.number("width", 980)?,
                height: window.number("height", 650)?,
                min_width: window.number("min_width", 400)?,
                min_height: window.number("min_height", 300)?,
            },
            logger: LoggerSettings {
                level: logger.text("level", "INFO")?,
                app_log_name: logger.text("app_log_name", "ee.log")?,
            },
            http_server: ServerSettings {
                enable: http.flag("enable", false)?,
                host: http.text("host", "127.0.0.1")?,
                port: http.number("port", 7071)?,
            },
            socket_server: ServerSettings {
                enable: socket.flag("enable", false)?,
                host: socket.text("host", "0.0.0.0")?,
                port: socket.number("port", 7070)?,
            },
        })
    }
}

fn wrong_kind(path: &str, expected: &'static str, found: ValueKind) -> SettingsError {
    SettingsError::WrongKind {
        path: path.to_string(),
        expected,
        found: found.to_string(),
    }
}

/// One map-valued section of the configuration; absent sections read as
/// empty so every key falls back to its default.
struct Section {
    name: &'static str,
    map: Option<Map>,
}

impl Section {
    fn path(&self, key: &str) -> String {
        if self.name.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.name, key)
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.map.as_ref().and_then(|m| m.get(key))
    }

    fn section(&self, key: &'static str) -> Result<Section, SettingsError> {
        match self.get(key) {
            None => Ok(Section {
                name: key,
                map: None,
            }),
            Some(Value::Map(map)) => Ok(Section {
                name: key,
                map: Some(map),
            }),
            Some(other) => Err(wrong_kind(&self.path(key), "a map", other.kind())),
        }
    }

    fn required_text(&self, key: &str) -> Result<String, SettingsError> {
        match self.get(key) {
            None => Err(SettingsError::Missing(self.path(key))),
            Some(Value::Text(s)) => Ok(s.to_string()),
            Some(other) => Err(wrong_kind(&self.path(key), "text", other.kind())),
        }
    }

    fn text(&self, key: &str, default: &str) -> Result<String, SettingsError> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(_) => self.required_text(key),
        }
    }

    fn flag(&self, key: &str, default: bool) -> Result<bool, SettingsError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(wrong_kind(&self.path(key), "a boolean", other.kind())),
        }
    }

    fn number<T: TryFrom<i64>>(&self, key: &str, default: T) -> Result<T, SettingsError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Int(i)) => T::try_from(i).map_err(|_| SettingsError::WrongKind {
                path: self.path(key),
                expected: "an integer in range",
                found: i.to_string(),
            }),
            Some(other) => Err(wrong_kind(&self.path(key), "an integer", other.kind())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with_title() -> Map {
        let window = Map::new();
        window.insert("title", Value::from("X-Tools"));
        let root = Map::new();
        root.insert("windows_option", Value::Map(window));
        root
    }

    #[test]
    fn test_sparse_config_falls_back_to_defaults() {
        // Arrange
        let root = root_with_title();

        // Act
        let settings = ShellSettings::from_value(&Value::Map(root)).unwrap();

        // Assert
        assert!(!settings.open_dev_tools);
        assert_eq!(settings.window.width, 980);
        assert_eq!(settings.window.min_height, 300);
        assert_eq!(settings.logger.level, "INFO");
        assert_eq!(settings.http_server.port, 7071);
        assert_eq!(settings.socket_server.port, 7070);
        assert!(!settings.http_server.enable);
    }

    #[test]
    fn test_missing_title_is_reported_with_path() {
        let err = ShellSettings::from_value(&Value::Map(Map::new())).unwrap_err();
        assert_eq!(err, SettingsError::Missing("windows_option.title".to_string()));
    }

    #[test]
    fn test_non_map_root_is_rejected() {
        let err = ShellSettings::from_value(&Value::from(1)).unwrap_err();
        assert!(matches!(err, SettingsError::WrongKind { ref path, .. } if path == "<root>"));
    }

    #[test]
    fn test_port_out_of_range_is_rejected() {
        let root = root_with_title();
        let http = Map::new();
        http.insert("port", Value::from(70_000));
        root.insert("http_server", Value::Map(http));

        let err = ShellSettings::from_value(&Value::Map(root)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "setting `http_server.port` must be an integer in range, found 70000"
        );
    }

    #[test]
    fn test_wrong_kind_names_found_kind() {
        let root = root_with_title();
        root.insert("open_dev_tools", Value::from("yes"));

        let err = ShellSettings::from_value(&Value::Map(root)).unwrap_err();

        assert_eq!(
            err,
            SettingsError::WrongKind {
                path: "open_dev_tools".to_string(),
                expected: "a boolean",
                found: "text".to_string(),
            }
        );
    }

    #[test]
    fn test_section_that_is_not_a_map_is_rejected() {
        let root = root_with_title();
        root.insert("logger", Value::from(Vec::<Value>::new()));
        let err = ShellSettings::from_value(&Value::Map(root)).unwrap_err();
        assert!(err.to_string().starts_with("setting `logger` must be a map"));
    }
}
