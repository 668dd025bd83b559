//! Cycle-safe deep cloner for value graphs.
//!
//! # How the traversal works (for beginners)
//!
//! The cloner walks the input depth-first and decides what to do with each
//! value by checking these rules in order; the first one that applies wins:
//!
//! 1. **Primitive** – returned as-is.  Immutable atoms need no copy.
//! 2. **Timestamp** – a new timestamp with the same instant.
//! 3. **Pattern** – a new pattern with the same source and flags.
//! 4. **Already seen** – the clone made earlier for the same node.  This is
//!    what stops cycles from recursing forever and makes two references to
//!    one input node come out as two references to one output node.
//! 5. **List** – a new list, registered *before* its elements are cloned.
//! 6. **Map** – a new map sharing the original's prototype, registered
//!    *before* its own entries are cloned.
//! 7. **Blob** – a new buffer holding a copy of the bytes.
//! 8. **Host** – rejected with [`CloneError::UnsupportedKind`].
//!
//! "Registered before" matters: when a list contains itself, the inner
//! reference is met while the outer list is still being filled, and rule 4
//! must already be able to answer with the half-built copy.
//!
//! Recursion depth follows the longest reference chain of the input.  A very
//! deep acyclic chain exhausts the stack rather than yielding a truncated
//! copy.

use thiserror::Error;
use tracing::{debug, trace};

use crate::graph::identity::IdentityMap;
use crate::value::{Blob, List, Map, Timestamp, Value};

/// Errors that can occur while cloning a value graph.
#[derive(Debug, Error, PartialEq)]
pub enum CloneError {
    /// The graph contains a value outside the clonable kind set.
    #[error("unsupported value kind: {type_name} cannot be cloned")]
    UnsupportedKind { type_name: String },
}

/// Deep-clones a value graph with a fresh identity map.
///
/// # Errors
///
/// Returns [`CloneError::UnsupportedKind`] if a host object is reachable
/// from `value`.
///
/// # Examples
///
/// ```rust
/// use xtools_core::{deep_clone, Map, Value};
///
/// let node = Map::new();
/// node.insert("self", Value::Map(node.clone()));
///
/// let copy = deep_clone(&Value::Map(node.clone())).unwrap();
/// let copy = copy.as_map().unwrap();
/// let inner = copy.get_own("self").unwrap();
/// assert!(inner.as_map().unwrap().ptr_eq(copy));
/// assert!(!copy.ptr_eq(&node));
/// ```
pub fn deep_clone(value: &Value) -> Result<Value, CloneError> {
    let mut cloner = GraphCloner::new();
    let result = cloner.clone_value(value);
    debug!(
        kind = %value.kind(),
        nodes = cloner.identity_map().len(),
        ok = result.is_ok(),
        "deep clone finished"
    );
    result
}

/// A cloning session.
///
/// Every value cloned through the same session shares one [`IdentityMap`],
/// so a node reachable from several roots is copied only once.
#[derive(Debug, Default)]
pub struct GraphCloner {
    seen: IdentityMap,
}

impl GraphCloner {
    /// Starts a session with an empty identity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session that continues from an existing identity map.
    pub fn with_identity_map(seen: IdentityMap) -> Self {
        Self { seen }
    }

    pub fn identity_map(&self) -> &IdentityMap {
        &self.seen
    }

    pub fn into_identity_map(self) -> IdentityMap {
        self.seen
    }

    /// Clones several roots in this session, preserving sharing between them.
    ///
    /// # Errors
    ///
    /// Stops at the first root that fails with [`CloneError`].
    pub fn clone_all(&mut self, roots: &[Value]) -> Result<Vec<Value>, CloneError> {
        roots.iter().map(|root| self.clone_value(root)).collect()
    }

    /// Clones `value`, reusing clones already produced in this session.
    ///
    /// # Errors
    ///
    /// Returns [`CloneError::UnsupportedKind`] if a host object is reachable
    /// from `value`.
    pub fn clone_value(&mut self, value: &Value) -> Result<Value, CloneError> {
        match value {
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Text(_) => Ok(value.clone()),

            Value::Timestamp(ts) => Ok(Value::Timestamp(Timestamp::new(ts.instant()))),

            Value::Pattern(pattern) => Ok(Value::Pattern(pattern.fresh_copy())),

            Value::List(list) => match self.seen.get(list.node_id()) {
                Some(done) => Ok(Self::reuse(done)),
                None => self.clone_list(list),
            },

            Value::Map(map) => match self.seen.get(map.node_id()) {
                Some(done) => Ok(Self::reuse(done)),
                None => self.clone_map(map),
            },

            Value::Blob(blob) => match self.seen.get(blob.node_id()) {
                Some(done) => Ok(Self::reuse(done)),
                None => Ok(self.clone_blob(blob)),
            },

            Value::Host(host) => Err(CloneError::UnsupportedKind {
                type_name: host.type_name().to_string(),
            }),
        }
    }

    fn reuse(done: &Value) -> Value {
        trace!(kind = %done.kind(), "reusing clone of already visited node");
        done.clone()
    }

    fn clone_list(&mut self, source: &List) -> Result<Value, CloneError> {
        let items = source.to_vec();
        let copy = List::with_capacity(items.len());
        self.seen
            .register(&Value::List(source.clone()), Value::List(copy.clone()));

        for item in &items {
            let cloned = self.clone_value(item)?;
            copy.push(cloned);
        }
        Ok(Value::List(copy))
    }

    fn clone_map(&mut self, source: &Map) -> Result<Value, CloneError> {
        // The prototype is the map's lineage, not part of its contents: the
        // copy points at the same prototype node.
        let copy = match source.prototype() {
            Some(proto) => Map::with_prototype(&proto),
            None => Map::new(),
        };
        self.seen
            .register(&Value::Map(source.clone()), Value::Map(copy.clone()));

        for (key, value) in source.entries() {
            let cloned = self.clone_value(&value)?;
            copy.insert(key, cloned);
        }
        Ok(Value::Map(copy))
    }

    fn clone_blob(&mut self, source: &Blob) -> Value {
        let copy = Value::Blob(Blob::new(source.to_vec()));
        self.seen.register(&Value::Blob(source.clone()), copy.clone());
        copy
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{HostObject, Pattern};

    #[derive(Debug)]
    struct NativeHandle;

    impl HostObject for NativeHandle {
        fn type_name(&self) -> &str {
            "native-handle"
        }
    }

    #[test]
    fn test_primitive_is_returned_unchanged() {
        let text = Value::from("hello");
        let cloned = deep_clone(&text).unwrap();
        assert!(cloned.ptr_eq(&text), "text must share the same allocation");
    }

    #[test]
    fn test_atomic_kinds_are_not_registered() {
        // Arrange
        let ts = Value::Timestamp(Timestamp::from_millis(1_000).unwrap());
        let pattern = Value::Pattern(Pattern::new("a", "g").unwrap());
        let list = Value::from(vec![ts.clone(), ts, pattern]);

        // Act
        let mut cloner = GraphCloner::new();
        let cloned = cloner.clone_value(&list).unwrap();

        // Assert: only the list itself is in the identity map.
        assert_eq!(cloner.identity_map().len(), 1);
        let items = cloned.as_list().unwrap().to_vec();
        assert!(
            !items[0].ptr_eq(&items[1]),
            "a shared timestamp is copied at each location"
        );
    }

    #[test]
    fn test_list_is_registered_before_elements() {
        let list = List::new();
        list.push(Value::from(1));
        list.push(Value::List(list.clone()));

        let cloned = deep_clone(&Value::List(list.clone())).unwrap();
        let copy = cloned.as_list().unwrap();

        assert_eq!(copy.len(), 2);
        assert!(copy.get(1).unwrap().as_list().unwrap().ptr_eq(copy));
        assert!(!copy.ptr_eq(&list));
    }

    #[test]
    fn test_map_copy_shares_prototype() {
        let proto = Map::new();
        proto.insert("inherited", Value::from(true));
        let map = Map::with_prototype(&proto);
        map.insert("own", Value::from(1));

        let cloned = deep_clone(&Value::Map(map)).unwrap();
        let copy = cloned.as_map().unwrap();

        assert!(copy.prototype().unwrap().ptr_eq(&proto));
        assert_eq!(copy.own_keys(), vec!["own".to_string()]);
        assert_eq!(copy.get("inherited").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_shared_blob_converges_to_one_copy() {
        let blob = Value::Blob(Blob::new(vec![1, 2, 3]));
        let list = Value::from(vec![blob.clone(), blob.clone()]);

        let cloned = deep_clone(&list).unwrap();
        let items = cloned.as_list().unwrap().to_vec();

        assert!(items[0].ptr_eq(&items[1]));
        assert!(!items[0].ptr_eq(&blob));
        assert_eq!(items[0].as_blob().unwrap().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_host_object_is_rejected() {
        let map = Map::new();
        map.insert("handle", Value::host(NativeHandle));

        let err = deep_clone(&Value::Map(map)).unwrap_err();

        assert_eq!(
            err,
            CloneError::UnsupportedKind {
                type_name: "native-handle".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "unsupported value kind: native-handle cannot be cloned"
        );
    }

    #[test]
    fn test_clone_all_preserves_sharing_across_roots() {
        let shared = Value::Map(Map::new());
        let a = Value::from(vec![shared.clone()]);
        let b = Value::from(vec![shared.clone()]);

        let mut cloner = GraphCloner::new();
        let out = cloner.clone_all(&[a, b]).unwrap();

        let from_a = out[0].as_list().unwrap().get(0).unwrap();
        let from_b = out[1].as_list().unwrap().get(0).unwrap();
        assert!(from_a.ptr_eq(&from_b));
        assert!(!from_a.ptr_eq(&shared));
    }

    #[test]
    fn test_separate_sessions_do_not_share_clones() {
        let shared = Value::Map(Map::new());
        let first = deep_clone(&shared).unwrap();
        let second = deep_clone(&shared).unwrap();
        assert!(!first.ptr_eq(&second));
    }

    #[test]
    fn test_with_identity_map_resumes_session() {
        let shared = Value::Map(Map::new());
        let mut cloner = GraphCloner::new();
        let first = cloner.clone_value(&shared).unwrap();

        let mut resumed = GraphCloner::with_identity_map(cloner.into_identity_map());
        let second = resumed.clone_value(&shared).unwrap();

        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn test_session_outliving_its_inputs_clones_new_nodes_afresh() {
        // Arrange: clone a temporary, then let the caller's handle go.
        let mut cloner = GraphCloner::new();
        {
            let temp = Map::new();
            temp.insert("stale", Value::from(1));
            cloner.clone_value(&Value::Map(temp)).unwrap();
        }

        // Act / Assert: every later node gets its own, correct clone.
        for i in 0..200 {
            let fresh = Map::new();
            fresh.insert("fresh", Value::from(i));
            let source = Value::Map(fresh);

            let copy = cloner.clone_value(&source).unwrap();

            assert!(
                crate::deep_equal(&source, &copy),
                "clone of {source:?} came back as {copy:?}"
            );
            assert!(!copy.ptr_eq(&source));
        }
    }
}
