//! The persistable-object capability
//!
//! Any type that can hand out its state as a [`Record`] and take it back from
//! a byte payload can be saved and restored by the manager. The framework
//! never looks inside a payload and never dispatches on the record type:
//! which object receives which record is decided by registration order alone.

use crate::error::ErrorKind;
use crate::record::Record;
use thiserror::Error;

/// Errors an object reports when it cannot adopt a loaded payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Fixed-size object given a payload of the wrong length
    #[error("expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Length the object accepts
        expected: usize,
        /// Length it was given
        actual: usize,
    },

    /// Variable-size object could not reserve room for the payload
    #[error("could not reserve {requested} bytes")]
    Allocation {
        /// Bytes requested
        requested: usize,
    },

    /// Payload content refused for another reason
    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl ImportError {
    /// Map onto the session-level error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            ImportError::Allocation { .. } => ErrorKind::Allocation,
            ImportError::Invalid(_) => ErrorKind::Invalid,
        }
    }
}

/// Failure reported by [`SerializableObject::self_check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CheckError {
    /// What the object found wrong with itself
    pub message: String,
}

impl CheckError {
    /// Create a check error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capability every persistable object implements.
///
/// # Contract
///
/// - `export_state` must not change the object. The returned record may
///   borrow from `self`; it has to be written out before the object is
///   mutated again, which the borrow checker enforces.
/// - `import_state` replaces the object's state. Fixed-size objects must
///   reject any payload whose length differs from their own
///   (see [`expect_len`]); variable-size objects accept any length.
/// - `self_check` is diagnostic only and has no bearing on save or load.
///
/// # Example
///
/// ```
/// use flatsave_core::{expect_len, ImportError, Record, SerializableObject};
///
/// struct Counter(u32);
///
/// impl SerializableObject for Counter {
///     fn export_state(&self) -> Record<'_> {
///         Record::owned(1, self.0.to_le_bytes().to_vec())
///     }
///
///     fn import_state(&mut self, payload: &[u8]) -> Result<(), ImportError> {
///         expect_len(4, payload)?;
///         self.0 = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
///         Ok(())
///     }
/// }
///
/// let mut c = Counter(0);
/// c.import_state(&7u32.to_le_bytes()).unwrap();
/// assert_eq!(c.export_state().payload(), &7u32.to_le_bytes());
/// ```
pub trait SerializableObject {
    /// Current state as a record.
    fn export_state(&self) -> Record<'_>;

    /// Replace state from a loaded payload.
    fn import_state(&mut self, payload: &[u8]) -> Result<(), ImportError>;

    /// Optional internal consistency check.
    fn self_check(&self) -> Result<(), CheckError> {
        Ok(())
    }
}

/// Reject `payload` unless it is exactly `expected` bytes long.
pub fn expect_len(expected: usize, payload: &[u8]) -> Result<(), ImportError> {
    if payload.len() == expected {
        Ok(())
    } else {
        Err(ImportError::SizeMismatch {
            expected,
            actual: payload.len(),
        })
    }
}
