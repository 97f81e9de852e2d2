//! Serialization Integration Tests
//!
//! End-to-end save/load through the facade: round trips, on-disk layout,
//! positional correspondence and failure handling.

#[path = "../common/mod.rs"]
mod common;

mod failures;
mod format;
