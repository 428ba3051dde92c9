//! Presentation coordinator.
//!
//! Consumes participant lifecycle and media events one at a time, keeps the
//! registry, screen-share lock and timers up to date, and emits the derived
//! presentation state and spatial audio placement to the UI layer.

mod manager;
mod types;


pub use manager::PresentationCoordinator;
pub use types::{SessionContext, SessionEvent, StageConfig, StageEvent};
