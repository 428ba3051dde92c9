//! Participant records and the media descriptors that update them.

use huddle_common::ParticipantId;
use serde::{Deserialize, Serialize};

/// Whether a participant is still in the session or was retained after
/// leaving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Active,
    Inactive,
}

/// A session member as seen by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub has_video: bool,
    pub has_screen_share: bool,
    pub is_local: bool,
    /// Ordering token assigned on first join; never reassigned.
    pub joined_at: u64,
    pub status: ParticipantStatus,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, is_local: bool, joined_at: u64) -> Self {
        Self {
            id,
            has_video: false,
            has_screen_share: false,
            is_local,
            joined_at,
            status: ParticipantStatus::Active,
        }
    }

    /// True when the participant contributes a video or screen-share track.
    pub fn has_media(&self) -> bool {
        self.has_video || self.has_screen_share
    }

    pub fn is_active(&self) -> bool {
        self.status == ParticipantStatus::Active
    }
}

/// Partial update merged into a participant record. `None` leaves the
/// attribute untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticipantPatch {
    pub has_video: Option<bool>,
    pub has_screen_share: Option<bool>,
}

impl ParticipantPatch {
    pub fn video(has_video: bool) -> Self {
        Self {
            has_video: Some(has_video),
            has_screen_share: None,
        }
    }

    pub fn screen_share(active: bool) -> Self {
        Self {
            has_video: None,
            has_screen_share: Some(active),
        }
    }

    /// Merge into `participant`, returning whether anything changed.
    pub(crate) fn apply(&self, participant: &mut Participant) -> bool {
        let mut changed = false;
        if let Some(has_video) = self.has_video {
            changed |= participant.has_video != has_video;
            participant.has_video = has_video;
        }
        if let Some(active) = self.has_screen_share {
            changed |= participant.has_screen_share != active;
            participant.has_screen_share = active;
        }
        changed
    }
}

/// Media capabilities carried by an inbound session event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaDescriptor {
    pub video_tracks: u32,
    pub audio_tracks: u32,
}

impl MediaDescriptor {
    pub fn audio_only() -> Self {
        Self {
            video_tracks: 0,
            audio_tracks: 1,
        }
    }

    pub fn with_video() -> Self {
        Self {
            video_tracks: 1,
            audio_tracks: 1,
        }
    }

    pub fn has_video(&self) -> bool {
        self.video_tracks > 0
    }

    /// Patch describing the participant's camera state.
    pub fn camera_patch(&self) -> ParticipantPatch {
        ParticipantPatch::video(self.has_video())
    }
}
