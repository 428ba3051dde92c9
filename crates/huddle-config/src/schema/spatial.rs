//! Spatial audio configuration types.

use serde::{Deserialize, Serialize};

/// Spatial audio placement settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    pub enabled: bool,
    /// Listener distance applied to every remote participant.
    pub distance: f64,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            distance: 0.2,
        }
    }
}
