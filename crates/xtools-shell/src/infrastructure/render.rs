//! JSON rendering of resolved configuration graphs for `xtools --json`.
//!
//! JSON is a tree, so shared sub-graphs are written out once per reference
//! and a cycle cannot be rendered at all.  Kinds without a JSON counterpart
//! are written in a readable form:
//!
//! - `Undefined` → `null`; non-finite floats → `null`
//! - `Timestamp` → RFC 3339 string with millisecond precision
//! - `Pattern`   → `"/source/flags"`
//! - `Blob`      → array of byte values
//! - `Map`       → object of its own keys (prototype keys are not rendered)
//!
//! Error paths start at `$`.  Keys that are plain identifiers are written as
//! `.key`; any other key is written as a quoted JSON string in brackets, so
//! `{"a.b": [..]}` reports `$["a.b"][0]` rather than the ambiguous `$.a.b[0]`.

use chrono::SecondsFormat;
use serde_json::{Map as JsonMap, Number};
use thiserror::Error;
use xtools_core::{NodeId, Value};

/// Errors raised while rendering a value graph as JSON.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// The graph refers back to one of its own ancestors.
    #[error("cannot render cyclic value at `{0}`")]
    Cycle(String),

    /// The graph contains a host object.
    #[error("cannot render {kind} value at `{path}`")]
    Unsupported { path: String, kind: String },
}

/// Renders `value` as JSON.
///
/// # Errors
///
/// Returns [`RenderError::Cycle`] if the graph is cyclic and
/// [`RenderError::Unsupported`] if it contains a host object.
pub fn to_json(value: &Value) -> Result<serde_json::Value, RenderError> {
    Renderer::default().render(value, "$")
}

#[derive(Default)]
struct Renderer {
    path: Vec<NodeId>,
}

impl Renderer {
    fn render(&mut self, value: &Value, at: &str) -> Result<serde_json::Value, RenderError> {
        Ok(match value {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(x) => Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.to_string()),
            Value::Timestamp(t) => serde_json::Value::String(
                t.instant().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            Value::Pattern(p) => {
                serde_json::Value::String(format!("/{}/{}", p.source(), p.flags()))
            }
            Value::Blob(b) => serde_json::Value::from(b.to_vec()),
            Value::List(list) => {
                self.enter(list.node_id(), at)?;
                let mut items = Vec::with_capacity(list.len());
                for (i, item) in list.to_vec().iter().enumerate() {
                    items.push(self.render(item, &format!("{at}[{i}]"))?);
                }
                self.path.pop();
                serde_json::Value::Array(items)
            }
            Value::Map(map) => {
                self.enter(map.node_id(), at)?;
                let mut object = JsonMap::new();
                for (key, item) in map.entries() {
                    let rendered = self.render(&item, &key_path(at, &key))?;
                    object.insert(key, rendered);
                }
                self.path.pop();
                serde_json::Value::Object(object)
            }
            Value::Host(_) => {
                return Err(RenderError::Unsupported {
                    path: at.to_string(),
                    kind: value.kind().to_string(),
                })
            }
        })
    }

    fn enter(&mut self, id: NodeId, at: &str) -> Result<(), RenderError> {
        if self.path.contains(&id) {
            return Err(RenderError::Cycle(at.to_string()));
        }
        self.path.push(id);
        Ok(())
    }
}

/// Appends `key` to the error path `at`.
fn key_path(at: &str, key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier {
        format!("{at}.{key}")
    } else {
        format!("{at}[{}]", serde_json::Value::String(key.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
