//! Core types for flatsave
//!
//! This crate defines the data contract shared by the framing layer and the
//! orchestrator:
//! - Record: type tag + payload, and its 8-byte little-endian header
//! - SerializableObject: the export/import/self-check capability
//! - Error: the session error taxonomy
//! - Diagnostics: the switch for diagnostic output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diagnostics;
pub mod error;
pub mod object;
pub mod record;

pub use diagnostics::Diagnostics;
pub use error::{Error, ErrorKind, Result};
pub use object::{expect_len, CheckError, ImportError, SerializableObject};
pub use record::{Record, RecordHeader};
