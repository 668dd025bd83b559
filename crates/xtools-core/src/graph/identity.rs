//! Identity-keyed visited map.
//!
//! # Why identity and not equality? (for beginners)
//!
//! Two different lists can hold exactly the same elements; they are *equal*
//! but not the *same* list.  The cloner must know whether it has already met
//! a particular node, not whether it has met an equal one, otherwise two
//! distinct-but-equal inputs would collapse into one shared output.
//!
//! Rust has no built-in identity map, so nodes are keyed by [`NodeId`], the
//! address of their shared allocation.  An address is only unique while the
//! node is alive, so each entry also holds a handle to the source node: as
//! long as the map exists, no registered address can be handed out to a new
//! node, even when the map outlives the graphs it was filled from.

use std::collections::HashMap;

use crate::value::{NodeId, Value};

/// A registered node: the source handle (kept alive to pin its address)
/// and the clone produced for it.
#[derive(Debug)]
struct Entry {
    _source: Value,
    clone: Value,
}

/// Maps original compound nodes to the clones created for them.
#[derive(Debug, Default)]
pub struct IdentityMap {
    clones: HashMap<NodeId, Entry>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the clone registered for `id`, if any.
    pub fn get(&self, id: NodeId) -> Option<&Value> {
        self.clones.get(&id).map(|entry| &entry.clone)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.clones.contains_key(&id)
    }

    /// Records `clone` as the copy of `source`.
    ///
    /// Must be called before any child of the node is cloned.  The map keeps
    /// a handle to `source` until it is dropped.  Primitives have no identity
    /// and are not recorded.
    pub fn register(&mut self, source: &Value, clone: Value) {
        if let Some(id) = source.node_id() {
            self.clones.insert(
                id,
                Entry {
                    _source: source.clone(),
                    clone,
                },
            );
        }
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }
}
