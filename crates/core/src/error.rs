//! Error types for save and load sessions
//!
//! Every fallible operation in the workspace returns [`Result`]. A session
//! (one `save_all` or `load_all` call) aborts on the first error and hands
//! that single error back to the caller.
//!
//! ## Error Kinds
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | Configuration | Target path missing or empty, session used in the wrong state |
//! | Io | Open, read, write, flush or close failed at the OS boundary |
//! | Allocation | Load buffer or registration list could not be reserved |
//! | SizeMismatch | An object rejected the length of its payload (carried by [`Error::Import`]) |
//! | Truncated | Fewer bytes remain than a header or declared payload demands |
//! | CapacityExceeded | Registration beyond the configured bound |

use crate::object::{CheckError, ImportError};
use std::path::PathBuf;
use thiserror::Error;

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or empty target path, or an operation issued in the wrong state
    Configuration,
    /// Failure at the OS boundary
    Io,
    /// Memory could not be reserved
    Allocation,
    /// Payload length not acceptable to the receiving object
    SizeMismatch,
    /// Not enough bytes left in the load buffer
    Truncated,
    /// Registration list is full
    CapacityExceeded,
    /// Payload refused for a reason other than its length
    Invalid,
    /// An object's self-check failed
    Check,
}

/// All errors raised by the framing layer and the orchestrator.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing target path or misuse of the session state machine
    #[error("configuration error: {0}")]
    Configuration(String),

    /// I/O failure with the operation and file it happened on
    #[error("I/O error during {op} on {}: {source}", .path.display())]
    Io {
        /// Operation that failed (open, read, write, flush, sync)
        op: &'static str,
        /// File the operation targeted
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// Buffer or list reservation failed
    #[error("allocation of {requested} {what} failed")]
    Allocation {
        /// What was being reserved
        what: &'static str,
        /// Number of elements requested
        requested: usize,
    },

    /// The load buffer ran out before a header or payload was complete
    #[error("truncated record at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        /// Cursor position where the read was attempted
        offset: usize,
        /// Bytes the header or declared payload requires
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Registration list is full
    #[error("capacity exceeded: {registered} objects registered, limit is {limit}")]
    CapacityExceeded {
        /// Configured capacity
        capacity: usize,
        /// Usable registrations under that capacity
        limit: usize,
        /// Objects registered when the attempt was made
        registered: usize,
    },

    /// Payload cannot be described by a 32-bit size field
    #[error("payload of {len} bytes exceeds the 32-bit record size field")]
    PayloadTooLarge {
        /// Payload length in bytes
        len: usize,
    },

    /// A registered object refused its payload
    #[error("object #{index} rejected record of type {record_type}: {source}")]
    Import {
        /// Registration index of the object
        index: usize,
        /// Type tag of the record it was given
        record_type: u32,
        /// The object's own error
        #[source]
        source: ImportError,
    },

    /// A registered object failed its self-check
    #[error("object #{index} failed self-check: {source}")]
    Check {
        /// Registration index of the object
        index: usize,
        /// The object's own error
        #[source]
        source: CheckError,
    },
}

/// Result type for flatsave operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an I/O error for `op` on `path`.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Build a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Io { .. } => ErrorKind::Io,
            Error::Allocation { .. } => ErrorKind::Allocation,
            Error::Truncated { .. } => ErrorKind::Truncated,
            Error::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Error::PayloadTooLarge { .. } => ErrorKind::Invalid,
            Error::Import { source, .. } => source.kind(),
            Error::Check { .. } => ErrorKind::Check,
        }
    }

    /// Check if this is a truncation error.
    pub fn is_truncated(&self) -> bool {
        self.kind() == ErrorKind::Truncated
    }

    /// Check if an object rejected its payload length.
    pub fn is_size_mismatch(&self) -> bool {
        self.kind() == ErrorKind::SizeMismatch
    }

    /// Check if a registration hit the capacity bound.
    pub fn is_capacity_exceeded(&self) -> bool {
        self.kind() == ErrorKind::CapacityExceeded
    }

    /// Check if this came from the OS boundary.
    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Io
    }
}
