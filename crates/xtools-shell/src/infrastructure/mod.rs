//! Infrastructure layer for the shell.
//!
//! Contains the file-system adapter that loads configuration profiles and the
//! JSON renderer used by the CLI.
//!
//! **Dependency rule**: this layer may depend on `domain`, `application` and
//! `xtools_core`, but MUST NOT be imported by the `domain` layer.

pub mod render;
pub mod storage;
