//! Storage infrastructure: configuration profile loading.
//!
//! - **`config`** – [`config::FileConfigSource`], the file-system
//!   implementation of `ConfigSource` reading `config.default.toml` and the
//!   per-profile overlays.
//! - **`convert`** – Turns parsed TOML into an `xtools_core::Value` graph.
//!
//! Keeping storage concerns here means the resolver can be tested against an
//! in-memory source without touching the disk.

pub mod config;
pub mod convert;
