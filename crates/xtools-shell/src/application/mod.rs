//! Application layer use cases for the shell.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules) and the infrastructure (files, environment, terminal).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects and the core cloner to fulfil a goal
//!   (e.g., "produce the effective configuration for the `prod` profile").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no file system access**.
//!
//! # Sub-modules
//!
//! - **`config_source`** – The [`config_source::ConfigSource`] trait the
//!   resolver loads profiles through, and its error type.
//!
//! - **`resolve_config`** – Copies the cached defaults and merges the active
//!   profile's overlay into the copy.

pub mod config_source;
pub mod resolve_config;
