//! # Flatsave
//!
//! Persist a heterogeneous set of objects to one flat file and restore them
//! later, without a central registry that knows each object's layout.
//!
//! Each object implements [`SerializableObject`]: it exports its state as a
//! [`Record`] (a type tag plus raw bytes) and imports it back from a payload.
//! A [`SerializationManager`] saves every registered object in registration
//! order and loads them back in that same order.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flatsave::prelude::*;
//!
//! let mut settings = Settings::default();
//! let mut profile = Profile::default();
//!
//! let mut mgr = SerializationManager::new()?;
//! mgr.register(&mut settings)?;
//! mgr.register(&mut profile)?;
//! mgr.save_all("savefile")?;
//!
//! // Later, with the same registration order:
//! mgr.load_all("savefile")?;
//! ```
//!
//! ## File Format
//!
//! A sequence of records, back to back: `type: u32 LE`, `size: u32 LE`, then
//! `size` payload bytes. No magic, version, checksum, record count or footer.
//! How many records are read is decided by how many objects are registered.
//!
//! ## Layers
//!
//! - [`Record`] / [`RecordHeader`] - the data unit and its 8-byte header
//! - [`SerializableObject`] - the capability a persistable object implements
//! - [`SerializationAgent`] - framing onto one file and deframing from a load buffer
//! - [`SerializationManager`] - save-all / load-all over registered objects

#![warn(missing_docs)]

pub mod prelude;

// Core data contract
pub use flatsave_core::{
    expect_len, CheckError, Diagnostics, Error, ErrorKind, ImportError, Record, RecordHeader,
    Result, SerializableObject,
};

// Sessions
pub use flatsave_durability::{
    AgentOptions, AgentState, LoadBuffer, ManagerOptions, SerializationAgent,
    SerializationManager, DEFAULT_CAPACITY, REGISTRATION_HEADROOM,
};
