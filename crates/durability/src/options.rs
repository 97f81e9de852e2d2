//! Session options
//!
//! [`ManagerOptions`] is the one configuration surface: it sets the
//! registration bound, the diagnostics switch, and whether a save is synced to
//! disk before it is reported complete. Each transient agent receives the
//! [`AgentOptions`] slice of it.

use flatsave_core::Diagnostics;
use serde::{Deserialize, Serialize};

/// Registration bound used when none is configured.
pub const DEFAULT_CAPACITY: usize = 8;

/// Options for a single [`SerializationAgent`](crate::SerializationAgent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOptions {
    /// Diagnostic output switch
    pub diagnostics: Diagnostics,
    /// Call `fsync` on the target after the final flush of a save
    pub sync_on_finalize: bool,
}

/// Options for a [`SerializationManager`](crate::SerializationManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerOptions {
    /// Registration bound; usable slots are `capacity - 1`
    pub capacity: usize,
    /// Diagnostic output switch
    pub diagnostics: Diagnostics,
    /// Call `fsync` on the target after the final flush of a save
    pub sync_on_finalize: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        ManagerOptions {
            capacity: DEFAULT_CAPACITY,
            diagnostics: Diagnostics::disabled(),
            sync_on_finalize: false,
        }
    }
}

impl ManagerOptions {
    /// Default options with diagnostics on
    pub fn verbose() -> Self {
        ManagerOptions {
            diagnostics: Diagnostics::enabled(),
            ..Default::default()
        }
    }

    /// Default options with the save synced to disk before returning
    pub fn durable() -> Self {
        ManagerOptions {
            sync_on_finalize: true,
            ..Default::default()
        }
    }

    /// Same options with a different registration bound
    pub fn with_capacity(self, capacity: usize) -> Self {
        ManagerOptions { capacity, ..self }
    }

    /// Options handed to each transient agent
    pub fn agent_options(&self) -> AgentOptions {
        AgentOptions {
            diagnostics: self.diagnostics,
            sync_on_finalize: self.sync_on_finalize,
        }
    }
}
