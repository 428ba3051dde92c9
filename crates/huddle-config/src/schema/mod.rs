//! Configuration schema types for Huddle.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the stage was tuned for.

mod display;
mod session;
mod spatial;
mod timing;

pub use display::*;
pub use session::*;
pub use spatial::*;
pub use timing::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Huddle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HuddleConfig {
    pub session: SessionConfig,
    pub timing: TimingConfig,
    pub spatial: SpatialConfig,
    pub display: DisplayConfig,
    pub labels: LabelsConfig,
}

// =============================================================================
// Tests
// =============================================================================
