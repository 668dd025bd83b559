//! Cycle-aware graph comparison.
//!
//! [`deep_equal`] answers "do these graphs hold the same data?".  It is
//! coinductive: when a pair of nodes is met again while it is still being
//! compared, the pair is assumed equal, so cyclic graphs terminate.
//!
//! [`same_topology`] additionally requires the aliasing structure to match.
//! Lists, maps and blobs of one graph are paired one-to-one with those of the
//! other; a node that appears at two locations in `a` must appear as one node
//! at the corresponding locations in `b`, and vice versa.  Timestamps and
//! patterns are compared by content only, since the cloner copies them per
//! location.

use std::collections::{HashMap, HashSet};

use crate::value::{Map, NodeId, Value};

/// Returns `true` if `a` and `b` hold the same data.
///
/// Floats compare NaN-equal-to-NaN, `Int` and `Float` are never equal to one
/// another, maps must share the same prototype node, and host objects are
/// equal only to themselves.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    Comparer::new(false).eq(a, b)
}

/// Returns `true` if `a` and `b` hold the same data *and* alias their lists,
/// maps and blobs in the same pattern.
pub fn same_topology(a: &Value, b: &Value) -> bool {
    Comparer::new(true).eq(a, b)
}

enum Visit {
    Known(bool),
    Fresh,
}

struct Comparer {
    topology: bool,
    assumed: HashSet<(NodeId, NodeId)>,
    forward: HashMap<NodeId, NodeId>,
    backward: HashMap<NodeId, NodeId>,
}

impl Comparer {
    fn new(topology: bool) -> Self {
        Self {
            topology,
            assumed: HashSet::new(),
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    fn visit(&mut self, a: NodeId, b: NodeId) -> Visit {
        if !self.topology {
            return if self.assumed.insert((a, b)) {
                Visit::Fresh
            } else {
                Visit::Known(true)
            };
        }

        match (self.forward.get(&a), self.backward.get(&b)) {
            (Some(&fb), Some(&ba)) => Visit::Known(fb == b && ba == a),
            (None, None) => {
                self.forward.insert(a, b);
                self.backward.insert(b, a);
                Visit::Fresh
            }
            _ => Visit::Known(false),
        }
    }

    fn eq(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
            (Value::Text(x), Value::Text(y)) => x == y,
            (Value::Timestamp(x), Value::Timestamp(y)) => x.instant() == y.instant(),
            (Value::Pattern(x), Value::Pattern(y)) => {
                x.source() == y.source() && x.flags() == y.flags()
            }
            (Value::Host(_), Value::Host(_)) => a.ptr_eq(b),
            (Value::Blob(x), Value::Blob(y)) => match self.visit(x.node_id(), y.node_id()) {
                Visit::Known(result) => result,
                Visit::Fresh => x.to_vec() == y.to_vec(),
            },
            (Value::List(x), Value::List(y)) => match self.visit(x.node_id(), y.node_id()) {
                Visit::Known(result) => result,
                Visit::Fresh => {
                    let xs = x.to_vec();
                    let ys = y.to_vec();
                    xs.len() == ys.len() && xs.iter().zip(&ys).all(|(p, q)| self.eq(p, q))
                }
            },
            (Value::Map(x), Value::Map(y)) => match self.visit(x.node_id(), y.node_id()) {
                Visit::Known(result) => result,
                Visit::Fresh => same_prototype(x, y) && self.entries_eq(x, y),
            },
            _ => false,
        }
    }

    fn entries_eq(&mut self, x: &Map, y: &Map) -> bool {
        let xs = x.entries();
        let ys = y.entries();
        xs.len() == ys.len()
            && xs
                .iter()
                .zip(&ys)
                .all(|((kx, vx), (ky, vy))| kx == ky && self.eq(vx, vy))
    }
}

fn same_prototype(x: &Map, y: &Map) -> bool {
    match (x.prototype(), y.prototype()) {
        (None, None) => true,
        (Some(p), Some(q)) => p.ptr_eq(&q),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{List, Pattern, Timestamp};

    fn pair_of_lists(shared: bool) -> Value {
        let inner = Value::from(vec![Value::from(1)]);
        let second = if shared {
            inner.clone()
        } else {
            Value::from(vec![Value::from(1)])
        };
        Value::from(vec![inner, second])
    }

    #[test]
    fn test_deep_equal_ignores_aliasing() {
        assert!(deep_equal(&pair_of_lists(true), &pair_of_lists(false)));
    }

    #[test]
    fn test_same_topology_detects_lost_sharing() {
        assert!(!same_topology(&pair_of_lists(true), &pair_of_lists(false)));
        assert!(!same_topology(&pair_of_lists(false), &pair_of_lists(true)));
        assert!(same_topology(&pair_of_lists(true), &pair_of_lists(true)));
    }

    #[test]
    fn test_cycles_terminate() {
        let a = List::new();
        a.push(Value::List(a.clone()));
        let b = List::new();
        b.push(Value::List(b.clone()));
        assert!(deep_equal(&Value::List(a.clone()), &Value::List(b.clone())));
        assert!(same_topology(&Value::List(a), &Value::List(b)));
    }

    #[test]
    fn test_numbers_of_different_kinds_differ() {
        assert!(!deep_equal(&Value::from(1), &Value::from(1.0)));
        assert!(deep_equal(&Value::Float(f64::NAN), &Value::Float(f64::NAN)));
    }

    #[test]
    fn test_maps_need_same_prototype_and_entries() {
        let proto = Map::new();
        let a = Map::with_prototype(&proto);
        let b = Map::with_prototype(&proto);
        a.insert("k", Value::from("v"));
        b.insert("k", Value::from("v"));
        assert!(deep_equal(&Value::Map(a.clone()), &Value::Map(b.clone())));

        let c = Map::new();
        c.insert("k", Value::from("v"));
        assert!(!deep_equal(&Value::Map(a.clone()), &Value::Map(c)));

        b.insert("extra", Value::Null);
        assert!(!deep_equal(&Value::Map(a), &Value::Map(b)));
    }

    #[test]
    fn test_atomic_kinds_compare_by_content() {
        let t1 = Value::Timestamp(Timestamp::from_millis(5).unwrap());
        let t2 = Value::Timestamp(Timestamp::from_millis(5).unwrap());
        assert!(same_topology(&t1, &t2));

        let p1 = Value::Pattern(Pattern::new("a+", "i").unwrap());
        let p2 = Value::Pattern(Pattern::new("a+", "i").unwrap());
        let p3 = Value::Pattern(Pattern::new("a+", "g").unwrap());
        assert!(deep_equal(&p1, &p2));
        assert!(!deep_equal(&p1, &p3));
    }
}
