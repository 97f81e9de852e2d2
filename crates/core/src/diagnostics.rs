//! Diagnostic output switch
//!
//! Agents and managers emit progress through `tracing`, but only when the
//! [`Diagnostics`] value they were built with is enabled. The value is created
//! once by the caller and copied into each component; there is no global flag.

use serde::{Deserialize, Serialize};

/// Whether agents and managers emit diagnostic events.
///
/// Accepted as configuration in the form `{"enabled": true}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Emit diagnostic events
    pub enabled: bool,
}

impl Diagnostics {
    /// Diagnostics on.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Diagnostics off (the default).
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether events should be emitted.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
