//! Presentation and spatial audio coordination for multi-party sessions.

pub mod coordinator;
pub mod lock;
pub mod participant;
pub mod presentation;
pub mod registry;
pub mod spatial;
pub mod timer;

pub use coordinator::{PresentationCoordinator, SessionContext, SessionEvent, StageConfig, StageEvent};
pub use lock::{LockTransition, ScreenShareLock};
pub use participant::{MediaDescriptor, Participant, ParticipantPatch, ParticipantStatus};
pub use presentation::{DisplayMode, PresentationState, RosterEntry};
pub use registry::{DeparturePolicy, ParticipantRegistry};
pub use spatial::{AudioPosition, Placement, SpatialAssignment, SpatialAudioPositioner};
pub use timer::{ActiveSpeakerMode, ActiveSpeakerSignal, ActiveSpeakerTimer, TimerState, TimerTick};
