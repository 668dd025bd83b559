//! Use case: produce the effective configuration for a profile.
//!
//! # How it works
//!
//! 1. The defaults are loaded once and cached for the resolver's lifetime.
//! 2. Every call to [`ConfigResolver::resolve`] deep-clones the cached
//!    defaults, so nothing a caller does to a resolved graph can leak back
//!    into the cache or into another profile's result.
//! 3. The profile's overlay (if any) is deep-cloned too and merged into the
//!    copy.  Maps merge key by key, recursively; any other value, lists
//!    included, replaces what the defaults had at that key.
//!
//! Merging walks both graphs at once.  A pair of maps already being merged
//! is skipped, so an overlay that refers back to itself still terminates.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info};
use xtools_core::{deep_clone, CloneError, Map, NodeId, Value};

use super::config_source::{ConfigError, ConfigSource};
use crate::domain::Profile;

/// Errors that can occur while resolving a profile.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to copy configuration: {0}")]
    Clone(#[from] CloneError),

    /// The defaults file did not produce a map at its root.
    #[error("default configuration must be a map, found {0}")]
    DefaultsNotMap(String),

    /// The overlay file did not produce a map at its root.
    #[error("overlay for profile `{profile}` must be a map, found {found}")]
    OverlayNotMap { profile: String, found: String },
}

/// Resolves profiles against a cached set of defaults.
pub struct ConfigResolver<S: ConfigSource> {
    source: S,
    defaults: Option<Value>,
}

impl<S: ConfigSource> ConfigResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            defaults: None,
        }
    }

    /// The cached defaults, loading them on first use.
    ///
    /// The returned graph is the cache itself.  Mutating it changes what
    /// every later [`resolve`](Self::resolve) starts from.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Config`] if the defaults cannot be loaded and
    /// [`ResolveError::DefaultsNotMap`] if they are not a map.
    pub fn defaults(&mut self) -> Result<&Value, ResolveError> {
        let defaults = match self.defaults.take() {
            Some(cached) => cached,
            None => {
                let loaded = self.source.load_defaults()?;
                if !matches!(loaded, Value::Map(_)) {
                    return Err(ResolveError::DefaultsNotMap(loaded.kind().to_string()));
                }
                info!("loaded default configuration");
                loaded
            }
        };
        Ok(self.defaults.insert(defaults))
    }

    /// Returns a fresh graph holding the defaults with `profile`'s overlay
    /// merged in.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if loading fails, if a root is not a map, or
    /// if either graph holds a value the cloner cannot copy.
    pub fn resolve(&mut self, profile: &Profile) -> Result<Value, ResolveError> {
        let resolved = deep_clone(self.defaults()?)?;
        let Value::Map(target) = &resolved else {
            return Err(ResolveError::DefaultsNotMap(resolved.kind().to_string()));
        };

        match self.source.load_overlay(profile)? {
            Some(overlay) => {
                let overlay = match deep_clone(&overlay)? {
                    Value::Map(map) => map,
                    other => {
                        return Err(ResolveError::OverlayNotMap {
                            profile: profile.to_string(),
                            found: other.kind().to_string(),
                        })
                    }
                };
                let mut visited = HashSet::new();
                let replaced = merge_into(target, &overlay, &mut visited);
                info!(%profile, keys = overlay.len(), replaced, "merged profile overlay");
            }
            None => info!(%profile, "profile has no overlay, using defaults"),
        }

        Ok(resolved)
    }
}

/// Merges `overlay`'s own keys into `target`, returning how many keys were
/// replaced or added.
fn merge_into(target: &Map, overlay: &Map, visited: &mut HashSet<(NodeId, NodeId)>) -> usize {
    if !visited.insert((target.node_id(), overlay.node_id())) {
        return 0;
    }

    let mut replaced = 0;
    for (key, value) in overlay.entries() {
        match (target.get_own(&key), &value) {
            (Some(Value::Map(existing)), Value::Map(incoming)) => {
                replaced += merge_into(&existing, incoming, visited);
            }
            _ => {
                debug!(%key, kind = %value.kind(), "overlay sets key");
                target.insert(key, value);
                replaced += 1;
            }
        }
    }
    replaced
}

// ── Tests ─────────────────────────────────────────────────────────────────────
