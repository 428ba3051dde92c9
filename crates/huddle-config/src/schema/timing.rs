//! Timing configuration types.

use serde::{Deserialize, Serialize};

/// Timers owned by the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between the first join and the "session started" signal,
    /// giving the media pipeline time to settle.
    pub session_start_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            session_start_delay_ms: 1000,
        }
    }
}
