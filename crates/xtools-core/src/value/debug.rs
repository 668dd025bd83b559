//! Cycle-safe `Debug` rendering of value graphs.

use std::cell::RefCell;
use std::fmt;

use super::{NodeId, Value};

/// Formats a value while tracking the compound nodes on the current path.
///
/// A node that is already on the path prints as `<cycle>`.  Shared nodes that
/// are *not* ancestors of themselves are printed in full at every location.
pub(crate) struct GraphDebug<'a> {
    value: &'a Value,
    path: &'a RefCell<Vec<NodeId>>,
}

impl<'a> GraphDebug<'a> {
    pub(crate) fn new(value: &'a Value, path: &'a RefCell<Vec<NodeId>>) -> Self {
        Self { value, path }
    }

    fn enter(&self, id: NodeId) -> bool {
        if self.path.borrow().contains(&id) {
            return false;
        }
        self.path.borrow_mut().push(id);
        true
    }

    fn leave(&self) {
        self.path.borrow_mut().pop();
    }
}

impl fmt::Debug for GraphDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "{:?}", &**s),
            Value::Timestamp(t) => fmt::Debug::fmt(t, f),
            Value::Pattern(p) => fmt::Debug::fmt(p, f),
            Value::Blob(b) => fmt::Debug::fmt(b, f),
            Value::Host(h) => write!(f, "Host({})", h.type_name()),
            Value::List(list) => {
                if !self.enter(list.node_id()) {
                    return f.write_str("<cycle>");
                }
                let items = list.to_vec();
                let result = f
                    .debug_list()
                    .entries(items.iter().map(|v| GraphDebug::new(v, self.path)))
                    .finish();
                self.leave();
                result
            }
            Value::Map(map) => {
                if !self.enter(map.node_id()) {
                    return f.write_str("<cycle>");
                }
                let entries = map.entries();
                let result = f
                    .debug_map()
                    .entries(entries.iter().map(|(k, v)| (k, GraphDebug::new(v, self.path))))
                    .finish();
                self.leave();
                result
            }
        }
    }
}
