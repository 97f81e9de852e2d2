//! Save and load sessions for flatsave
//!
//! This crate turns registered objects into a flat file and back:
//! - SerializationAgent: frames records onto one file, deframes them from a load buffer
//! - LoadBuffer: whole-file buffer with a forward-only cursor
//! - SerializationManager: drives the agent over registered objects in registration order
//! - ManagerOptions / AgentOptions: capacity, diagnostics, sync-on-finalize

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Emit a `tracing` event only when diagnostics are enabled.
macro_rules! diag {
    ($diag:expr, $level:ident, $($arg:tt)+) => {
        if $diag.is_enabled() {
            tracing::$level!($($arg)+);
        }
    };
}

pub mod agent;
pub mod buffer;
pub mod manager;
pub mod options;

pub use agent::{AgentState, SerializationAgent};
pub use buffer::LoadBuffer;
pub use manager::{SerializationManager, REGISTRATION_HEADROOM};
pub use options::{AgentOptions, ManagerOptions, DEFAULT_CAPACITY};
