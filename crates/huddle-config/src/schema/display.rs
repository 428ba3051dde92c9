//! Display and label configuration types.

use serde::{Deserialize, Serialize};

/// Speaker view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Whether the speaker view fills its frame (crops) rather than fits.
    pub speaker_content_fill: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            speaker_content_fill: true,
        }
    }
}

/// Texts surfaced through the presentation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    /// Shown while no remote participant has any media stream.
    pub waiting: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            waiting: "Calling...".into(),
        }
    }
}
