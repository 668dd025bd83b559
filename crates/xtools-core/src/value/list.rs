//! Ordered sequence handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{NodeId, Value};

/// A shared, growable, ordered sequence of values.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    /// Creates a list holding `items` in order.
    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a handle to the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`.
    ///
    /// Returns `false` (and leaves the list unchanged) when `index` is out of
    /// bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        let previous = {
            let mut items = self.0.borrow_mut();
            match items.get_mut(index) {
                Some(slot) => std::mem::replace(slot, value),
                None => return false,
            }
        };
        drop(previous);
        true
    }

    /// Appends `value` to the end of the list.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Snapshot of the element handles, in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` when both handles point at the same list.
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.0)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::List(self.clone()), f)
    }
}
