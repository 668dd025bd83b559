//! Key-associative mapping with an optional prototype link.
//!
//! # Own keys and prototypes (for beginners)
//!
//! Every map stores its *own* entries directly.  It may also point at a
//! *prototype* map: a lookup that misses the own entries continues in the
//! prototype, then in the prototype's prototype, and so on.  Keys found that
//! way are *inherited*, not owned.
//!
//! The prototype link is what gives a map its "kind": two maps sharing a
//! prototype belong to the same family.  The cloner keeps that link intact
//! (pointing at the *same* prototype) and only copies own entries.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::{NodeId, Value, ValueError};

#[derive(Default)]
struct MapData {
    prototype: Option<Map>,
    entries: BTreeMap<String, Value>,
}

/// A shared, key-ordered mapping from string keys to values.
#[derive(Clone, Default)]
pub struct Map(Rc<RefCell<MapData>>);

impl Map {
    /// Creates an empty map with no prototype.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map inheriting from `prototype`.
    pub fn with_prototype(prototype: &Map) -> Self {
        Self(Rc::new(RefCell::new(MapData {
            prototype: Some(prototype.clone()),
            entries: BTreeMap::new(),
        })))
    }

    /// Returns the prototype handle, if any.
    pub fn prototype(&self) -> Option<Map> {
        self.0.borrow().prototype.clone()
    }

    /// Replaces the prototype link.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::PrototypeCycle`] if `prototype` is this map or
    /// already inherits from it.
    pub fn set_prototype(&self, prototype: Option<&Map>) -> Result<(), ValueError> {
        if let Some(proto) = prototype {
            let mut current = Some(proto.clone());
            while let Some(map) = current {
                if map.ptr_eq(self) {
                    return Err(ValueError::PrototypeCycle);
                }
                current = map.prototype();
            }
        }
        self.0.borrow_mut().prototype = prototype.cloned();
        Ok(())
    }

    /// Looks up an own entry, ignoring the prototype chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.borrow().entries.get(key).cloned()
    }

    /// Looks up `key` in the own entries, then along the prototype chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = Some(self.clone());
        while let Some(map) = current {
            if let Some(value) = map.get_own(key) {
                return Some(value);
            }
            current = map.prototype();
        }
        None
    }

    /// Returns `true` if `key` is an own entry.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().entries.contains_key(key)
    }

    /// Inserts an own entry, returning the previous own value.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.borrow_mut().entries.insert(key.into(), value)
    }

    /// Removes an own entry.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().entries.remove(key)
    }

    /// Own keys in key order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().entries.keys().cloned().collect()
    }

    /// Snapshot of the own entries in key order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of own entries.
    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().entries.is_empty()
    }

    /// Returns `true` when both handles point at the same map.
    pub fn ptr_eq(&self, other: &Map) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.0)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Map(self.clone()), f)
    }
}
