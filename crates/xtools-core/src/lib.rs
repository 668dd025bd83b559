//! # xtools-core
//!
//! In-memory value graph model and the deep cloner used by X-Tools.
//!
//! The crate has no I/O, reads no configuration and has no dependency on the
//! desktop shell.  Callers hand it a [`Value`] they own and get back an
//! independent copy.
//!
//! # Architecture overview (for beginners)
//!
//! A *value graph* is a tree of values in which some nodes may be reachable
//! along more than one path (shared references) or even from themselves
//! (cycles).  Copying such a graph naively either duplicates shared nodes or
//! never terminates.
//!
//! - **`value`** – The closed set of value kinds.  Primitives (`Null`,
//!   numbers, text, ...) are copied by value.  Compound kinds (`List`, `Map`,
//!   `Timestamp`, `Pattern`, `Blob`) are reference-counted handles with their
//!   own identity.
//!
//! - **`graph`** – Operations over whole graphs: the identity map that tracks
//!   which nodes were already copied, the [`GraphCloner`] itself, and the
//!   cycle-aware comparison helpers used to check a clone against its source.

pub mod graph;
pub mod value;

// Re-export the most-used types at the crate root so callers can write
// `xtools_core::deep_clone` instead of `xtools_core::graph::cloner::deep_clone`.
pub use graph::cloner::{deep_clone, CloneError, GraphCloner};
pub use graph::compare::{deep_equal, same_topology};
pub use graph::identity::IdentityMap;
pub use value::{
    Blob, HostObject, List, Map, NodeId, Pattern, PatternFlags, Timestamp, Value, ValueError,
    ValueKind,
};
