//! Binary buffer handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::NodeId;

/// A shared, mutable byte buffer.
#[derive(Clone, Default)]
pub struct Blob(Rc<RefCell<Vec<u8>>>);

impl Blob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Rc::new(RefCell::new(bytes)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.borrow().get(index).copied()
    }

    /// Overwrites one byte.  Returns `false` when `index` is out of bounds.
    pub fn set(&self, index: usize, byte: u8) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = byte;
                true
            }
            None => false,
        }
    }

    /// Copy of the bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Blob) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.0)
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob({} bytes)", self.len())
    }
}
