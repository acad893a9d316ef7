use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gateway::constants::{
    DEFAULT_FIRST_BACKOFF_MS, DEFAULT_JITTER_FACTOR, DEFAULT_MAX_BACKOFF_MS,
};

/// Reconnect backoff bounds for the control channel.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub first_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// Fraction of the recommended delay the jitter may move it by, 0.0..=1.0.
    pub jitter_factor: f64,
}

impl RetryConfig {
    pub fn first_backoff(&self) -> Duration {
        Duration::from_millis(self.first_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            first_backoff_ms: DEFAULT_FIRST_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
            jitter_factor: DEFAULT_JITTER_FACTOR,
        }
    }
}
