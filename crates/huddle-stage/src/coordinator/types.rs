//! Context, configuration, and events for the presentation coordinator.

use std::time::Duration;

use huddle_common::{ParticipantId, SessionId};
use huddle_config::HuddleConfig;
use serde::{Deserialize, Serialize};

use crate::participant::MediaDescriptor;
use crate::presentation::PresentationState;
use crate::spatial::{SpatialAssignment, DEFAULT_DISTANCE};
use crate::timer::ActiveSpeakerSignal;

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Session-wide facts handed to the coordinator at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: SessionId,
    pub local_participant: ParticipantId,
}

impl SessionContext {
    pub fn new(local_participant: ParticipantId) -> Self {
        Self {
            session_id: SessionId::new(),
            local_participant,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime settings, resolved once per session.
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Keep participants that left in the roster as inactive.
    pub retain_left_participants: bool,
    /// Request a hang-up once the last remote participant leaves.
    pub telecom: bool,
    pub appear_maximized: bool,
    pub session_start_delay: Duration,
    pub spatial_audio: bool,
    pub spatial_distance: f64,
    pub speaker_content_fill: bool,
    pub waiting_label: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            retain_left_participants: false,
            telecom: false,
            appear_maximized: true,
            session_start_delay: Duration::from_secs(1),
            spatial_audio: true,
            spatial_distance: DEFAULT_DISTANCE,
            speaker_content_fill: true,
            waiting_label: "Calling...".into(),
        }
    }
}

impl From<&HuddleConfig> for StageConfig {
    fn from(config: &HuddleConfig) -> Self {
        Self {
            retain_left_participants: config.session.retain_left_participants,
            telecom: config.session.telecom,
            appear_maximized: config.session.appear_maximized,
            session_start_delay: Duration::from_millis(u64::from(
                config.timing.session_start_delay_ms,
            )),
            spatial_audio: config.spatial.enabled,
            spatial_distance: config.spatial.distance,
            speaker_content_fill: config.display.speaker_content_fill,
            waiting_label: config.labels.waiting.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Inbound lifecycle events from the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    ParticipantJoined {
        participant: ParticipantId,
        #[serde(default)]
        media: MediaDescriptor,
    },
    ParticipantUpdated {
        participant: ParticipantId,
        #[serde(default)]
        media: MediaDescriptor,
    },
    ParticipantLeft {
        participant: ParticipantId,
    },
    ScreenShareStarted {
        participant: ParticipantId,
        #[serde(default)]
        media: MediaDescriptor,
    },
    ScreenShareStopped {
        participant: ParticipantId,
    },
    SessionEnded,
}

/// Outbound signals for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum StageEvent {
    PresentationChanged(PresentationState),
    SpatialAudioChanged(SpatialAssignment),
    /// One-shot, after the session-start delay.
    SessionStarted,
    ActiveSpeakerChanged(ActiveSpeakerSignal),
    /// Telecom mode: the last remote participant left.
    HangUpRequested,
    SessionEnded,
}
