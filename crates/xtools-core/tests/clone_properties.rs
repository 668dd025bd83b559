//! Integration tests for the deep cloner.
//!
//! These tests exercise the public API only (`deep_clone`, the value handles
//! and the comparison helpers) and check the guarantees callers rely on:
//! primitives pass through, compound values come back independent, cycles
//! terminate, and shared nodes stay shared.

use chrono::{TimeZone, Utc};
use xtools_core::{
    deep_clone, deep_equal, same_topology, Blob, CloneError, HostObject, List, Map, Pattern,
    Timestamp, Value,
};

#[derive(Debug)]
struct WindowHandle;

impl HostObject for WindowHandle {
    fn type_name(&self) -> &str {
        "BrowserWindow"
    }
}

fn sample_config() -> Value {
    let window = Map::new();
    window.insert("title", Value::from("X-Tools"));
    window.insert("width", Value::from(980));
    window.insert("height", Value::from(650));

    let server = Map::new();
    server.insert("enable", Value::from(false));
    server.insert("port", Value::from(7071));
    server.insert(
        "transports",
        Value::from(vec![Value::from("polling"), Value::from("websocket")]),
    );

    let root = Map::new();
    root.insert("windowsOption", Value::Map(window));
    root.insert("httpServer", Value::Map(server));
    root.insert("openDevTools", Value::from(false));
    Value::Map(root)
}

// ── Primitive identity ────────────────────────────────────────────────────────

#[test]
fn test_every_primitive_clones_to_itself() {
    let primitives = [
        Value::Undefined,
        Value::Null,
        Value::from(true),
        Value::from(-42),
        Value::from(3.25),
        Value::Float(f64::NAN),
        Value::from("immutable text"),
    ];

    for p in &primitives {
        let cloned = deep_clone(p).expect("primitives always clone");
        assert!(cloned.ptr_eq(p), "{:?} must come back identical", p);
    }
}

// ── Structural equality, reference independence ──────────────────────────────

#[test]
fn test_clone_is_deep_equal_and_independent() {
    // Arrange
    let original = sample_config();

    // Act
    let copy = deep_clone(&original).expect("config clones");

    // Assert: same content, different nodes.
    assert!(deep_equal(&original, &copy));
    assert!(!copy.ptr_eq(&original));

    let orig_root = original.as_map().unwrap();
    let copy_root = copy.as_map().unwrap();
    let copy_server = copy_root.get_own("httpServer").unwrap();
    let copy_server = copy_server.as_map().unwrap();

    // Mutating the clone must not leak into the original.
    copy_server.insert("port", Value::from(9000));
    copy_server
        .get_own("transports")
        .unwrap()
        .as_list()
        .unwrap()
        .push(Value::from("extra"));

    let orig_server = orig_root.get_own("httpServer").unwrap();
    let orig_server = orig_server.as_map().unwrap();
    assert_eq!(orig_server.get_own("port").and_then(|v| v.as_int()), Some(7071));
    assert_eq!(
        orig_server.get_own("transports").unwrap().as_list().unwrap().len(),
        2
    );

    // ...and vice versa.
    orig_root.insert("openDevTools", Value::from(true));
    assert_eq!(
        copy_root.get_own("openDevTools").and_then(|v| v.as_bool()),
        Some(false)
    );
}

// ── Self-reference termination ───────────────────────────────────────────────

#[test]
fn test_self_referencing_map_clone_points_at_itself() {
    let a = Map::new();
    a.insert("self", Value::Map(a.clone()));

    let cloned = deep_clone(&Value::Map(a.clone())).expect("cycle terminates");
    let copy = cloned.as_map().unwrap();
    let self_ref = copy.get_own("self").unwrap();

    assert!(self_ref.as_map().unwrap().ptr_eq(copy));
    assert!(!self_ref.as_map().unwrap().ptr_eq(&a));
}

#[test]
fn test_mutual_references_are_preserved() {
    let parent = Map::new();
    let child = Map::new();
    parent.insert("child", Value::Map(child.clone()));
    child.insert("parent", Value::Map(parent.clone()));

    let cloned = deep_clone(&Value::Map(parent.clone())).unwrap();

    assert!(same_topology(&Value::Map(parent), &cloned));
    let copy_parent = cloned.as_map().unwrap();
    let copy_child = copy_parent.get_own("child").unwrap();
    let back = copy_child.as_map().unwrap().get_own("parent").unwrap();
    assert!(back.as_map().unwrap().ptr_eq(copy_parent));
}

// ── Shared-reference preservation ────────────────────────────────────────────

#[test]
fn test_shared_node_is_cloned_once() {
    let shared = Map::new();
    shared.insert("x", Value::from(1));
    let container = Value::from(vec![Value::Map(shared.clone()), Value::Map(shared.clone())]);

    let cloned = deep_clone(&container).unwrap();
    let items = cloned.as_list().unwrap().to_vec();

    assert!(items[0].ptr_eq(&items[1]), "one shared clone, not two");
    assert!(!items[0].as_map().unwrap().ptr_eq(&shared));
    assert!(same_topology(&container, &cloned));
}

// ── Sequence order preservation ──────────────────────────────────────────────

#[test]
fn test_sequence_order_is_preserved() {
    let n = Map::new();
    n.insert("n", Value::from(1));
    let list = Value::from(vec![Value::from(10), Value::from("a"), Value::Map(n)]);

    let cloned = deep_clone(&list).unwrap();
    let (orig, copy) = (list.as_list().unwrap(), cloned.as_list().unwrap());

    assert_eq!(orig.len(), copy.len());
    for i in 0..orig.len() {
        assert!(
            deep_equal(&orig.get(i).unwrap(), &copy.get(i).unwrap()),
            "element {i} differs"
        );
    }
    assert_eq!(copy.get(0).and_then(|v| v.as_int()), Some(10));
    assert_eq!(copy.get(1).as_ref().and_then(Value::as_text), Some("a"));
}

// ── Atomic-kind round trip ───────────────────────────────────────────────────

#[test]
fn test_timestamp_round_trip_keeps_instant_not_identity() {
    let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
    let original = Timestamp::new(instant);

    let cloned = deep_clone(&Value::Timestamp(original.clone())).unwrap();
    let copy = cloned.as_timestamp().unwrap();

    assert_eq!(copy.instant(), instant);
    assert!(!copy.ptr_eq(&original));

    copy.set_instant(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(original.instant(), instant, "the original must not move");
}

#[test]
fn test_pattern_round_trip_keeps_source_and_flags() {
    let original = Pattern::new(r"^\w+@x-tools\.dev$", "im").unwrap();
    original.set_last_index(3);

    let cloned = deep_clone(&Value::Pattern(original.clone())).unwrap();
    let copy = cloned.as_pattern().unwrap();

    assert_eq!(copy.source(), original.source());
    assert_eq!(copy.flags(), original.flags());
    assert_eq!(copy.flags().to_string(), "im");
    assert!(!copy.ptr_eq(&original));
    assert!(copy.is_match("Admin@X-Tools.dev"));
    assert_eq!(copy.last_index(), 0);
}

// ── Own keys only ────────────────────────────────────────────────────────────

#[test]
fn test_inherited_keys_are_not_copied_as_own() {
    let proto = Map::new();
    proto.insert("inherited", Value::from("from prototype"));
    let map = Map::with_prototype(&proto);
    map.insert("own", Value::from(1));

    let cloned = deep_clone(&Value::Map(map)).unwrap();
    let copy = cloned.as_map().unwrap();

    assert_eq!(copy.own_keys(), vec!["own".to_string()]);
    assert!(!copy.has_own("inherited"));
    // The lineage is kept, so the inherited key still resolves through it.
    assert!(copy.prototype().unwrap().ptr_eq(&proto));
    assert_eq!(
        copy.get("inherited").as_ref().and_then(Value::as_text),
        Some("from prototype")
    );
}

// ── Extension and unsupported kinds ──────────────────────────────────────────

#[test]
fn test_blob_bytes_are_copied() {
    let blob = Blob::new(vec![0xDE, 0xAD]);
    let cloned = deep_clone(&Value::Blob(blob.clone())).unwrap();
    let copy = cloned.as_blob().unwrap();

    copy.set(0, 0x00);
    assert_eq!(blob.to_vec(), vec![0xDE, 0xAD]);
    assert_eq!(copy.to_vec(), vec![0x00, 0xAD]);
}

#[test]
fn test_host_object_deep_in_graph_fails_whole_clone() {
    let inner = List::from_vec(vec![Value::from(1), Value::host(WindowHandle)]);
    let root = Map::new();
    root.insert("windows", Value::List(inner));

    let result = deep_clone(&Value::Map(root));

    assert!(matches!(
        result,
        Err(CloneError::UnsupportedKind { ref type_name }) if type_name == "BrowserWindow"
    ));
}
