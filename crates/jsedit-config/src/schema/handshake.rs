//! Handshake timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long the host keeps calling `initialize` before giving up on the
/// embedded editor, and how long it waits between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeConfig {
    /// Overall budget in milliseconds.
    pub timeout_ms: u64,
    /// Pause between attempts in milliseconds.
    pub retry_interval_ms: u64,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            retry_interval_ms: 50,
        }
    }
}

impl HandshakeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }
}
