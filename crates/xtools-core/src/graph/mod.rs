//! Whole-graph operations.
//!
//! - **`identity`** – The traversal-scoped table from original node identity
//!   to the clone already produced for it.
//! - **`cloner`** – The deep cloner.
//! - **`compare`** – Cycle-aware content and topology comparison, mostly used
//!   to check a clone against its source.

pub mod cloner;
pub mod compare;
pub mod identity;
