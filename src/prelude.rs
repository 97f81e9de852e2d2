//! Convenient imports for Flatsave.
//!
//! ```ignore
//! use flatsave::prelude::*;
//!
//! let mut mgr = SerializationManager::new()?;
//! mgr.register(&mut my_object)?;
//! mgr.save_all("savefile")?;
//! ```

// Orchestration
pub use crate::{ManagerOptions, SerializationManager};

// Implementing persistable objects
pub use crate::{expect_len, CheckError, ImportError, Record, SerializableObject};

// Error handling
pub use crate::{Error, ErrorKind, Result};

// Diagnostics
pub use crate::Diagnostics;
