//! The closed set of value kinds the cloner understands.
//!
//! # Primitive vs compound (for beginners)
//!
//! A *primitive* is an immutable atom: copying it is indistinguishable from
//! sharing it.  `Text` is stored as an `Rc<str>`, so two copies of the same
//! text may point at one allocation; nobody can mutate it through either.
//!
//! A *compound* value is a handle to a shared, mutable allocation
//! (`Rc<RefCell<..>>` or `Rc<Cell<..>>`).  Calling `.clone()` on a handle only
//! copies the handle: both copies still point at the same node.  That is what
//! gives compound values an *identity* ([`NodeId`]), and it is why a real deep
//! copy needs [`crate::GraphCloner`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

pub mod blob;
pub mod list;
pub mod map;
pub mod pattern;
pub mod timestamp;

mod debug;

pub use blob::Blob;
pub use list::List;
pub use map::Map;
pub use pattern::{Pattern, PatternFlags};
pub use timestamp::Timestamp;

/// Errors raised while constructing or mutating values.
#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    /// The flag string contains an unknown or repeated letter.
    #[error("invalid pattern flags {flags:?}: {reason}")]
    InvalidFlags { flags: String, reason: String },

    /// The pattern text is not a valid regular expression.
    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The millisecond offset does not fit in a calendar timestamp.
    #[error("timestamp out of range: {0} ms since the Unix epoch")]
    TimestampOutOfRange(i64),

    /// Linking the prototype would make the map inherit from itself.
    #[error("prototype cycle: a map cannot inherit from itself")]
    PrototypeCycle,
}

/// Stable identity of a compound node.
///
/// Derived from the address of the node's shared allocation, so it is only
/// meaningful while the node is alive.  Two handles to the same node always
/// report the same `NodeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>() as usize)
    }
}

/// An embedder-provided object living inside a value graph.
///
/// Host objects (callbacks, native handles, ...) sit outside the clonable
/// kind set: cloning a graph that contains one fails with
/// [`crate::CloneError::UnsupportedKind`].
pub trait HostObject: fmt::Debug {
    /// Name reported in errors and debug output.
    fn type_name(&self) -> &str;
}

/// Discriminant of a [`Value`], used in error messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Int,
    Float,
    Text,
    Timestamp,
    Pattern,
    Blob,
    List,
    Map,
    Host,
}

impl ValueKind {
    /// Lower-case name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Pattern => "pattern",
            ValueKind::Blob => "blob",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Host => "host",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node in a value graph.
///
/// `Value::clone()` is a *shallow* handle copy.  Use [`crate::deep_clone`]
/// to get an independent graph.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value.
    Undefined,
    /// Explicit null marker.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Rc<str>),
    Timestamp(Timestamp),
    Pattern(Pattern),
    Blob(Blob),
    List(List),
    Map(Map),
    Host(Rc<dyn HostObject>),
}

impl Value {
    /// Wraps a host object.
    pub fn host(object: impl HostObject + 'static) -> Self {
        Value::Host(Rc::new(object))
    }

    /// Returns the kind discriminant.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Pattern(_) => ValueKind::Pattern,
            Value::Blob(_) => ValueKind::Blob,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Host(_) => ValueKind::Host,
        }
    }

    /// Returns `true` for immutable atoms that are copied by value.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined
                | Value::Null
                | Value::Bool(_)
                | Value::Int(_)
                | Value::Float(_)
                | Value::Text(_)
        )
    }

    /// Returns `true` for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Identity of the underlying node, or `None` for primitives.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Value::Timestamp(t) => Some(t.node_id()),
            Value::Pattern(p) => Some(p.node_id()),
            Value::Blob(b) => Some(b.node_id()),
            Value::List(l) => Some(l.node_id()),
            Value::Map(m) => Some(m.node_id()),
            Value::Host(h) => Some(NodeId::of(h)),
            _ => None,
        }
    }

    /// Identity comparison.
    ///
    /// Primitives are identical when they hold the same value (text must
    /// share the same allocation); compound values when they are the same
    /// node.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => Rc::ptr_eq(a, b),
            _ => match (self.node_id(), other.node_id()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = RefCell::new(Vec::new());
        fmt::Debug::fmt(&debug::GraphDebug::new(self, &path), f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Rc::from(s))
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Text(s)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Value::Blob(b)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(List::from_vec(items))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
