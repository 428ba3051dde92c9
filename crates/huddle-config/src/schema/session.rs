//! Session behavior configuration types.

use serde::{Deserialize, Serialize};

/// How the stage treats the participants of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep participants that left in the roster, shown as inactive.
    pub retain_left_participants: bool,
    /// Behave like a cellular call: ask the host to hang up once the
    /// last remote participant leaves.
    pub telecom: bool,
    /// Whether the session view starts maximized.
    pub appear_maximized: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retain_left_participants: false,
            telecom: false,
            appear_maximized: true,
        }
    }
}
