//! Derived presentation state.
//!
//! The state is recomputed from scratch after every change, never patched,
//! so it is a pure function of the registry, the screen-share lock and the
//! few view flags the coordinator owns.

use huddle_common::ParticipantId;
use serde::Serialize;

use crate::lock::ScreenShareLock;
use crate::participant::ParticipantStatus;
use crate::registry::ParticipantRegistry;

/// How the speaker view scales its video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Crop to fill the frame.
    #[default]
    Fill,
    /// Letterbox to show the whole frame, used for shared screens.
    Fit,
}

impl DisplayMode {
    pub fn from_content_fill(fill: bool) -> Self {
        if fill {
            Self::Fill
        } else {
            Self::Fit
        }
    }
}

/// A remote participant registered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub participant: ParticipantId,
    pub status: ParticipantStatus,
    pub has_media: bool,
    pub presenting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub full_screen_target: Option<ParticipantId>,
    pub local_preview_visible: bool,
    pub state_label: Option<String>,
    pub screen_share_locked: Option<ParticipantId>,
    pub display_mode: DisplayMode,
    /// Whether the UI may initiate a screen share of its own.
    pub screen_share_enabled: bool,
    pub roster: Vec<RosterEntry>,
}

/// Everything the presentation state is derived from.
pub struct PresentationInputs<'a> {
    pub registry: &'a ParticipantRegistry,
    pub lock: &'a ScreenShareLock,
    pub display_mode: DisplayMode,
    pub minimized: bool,
    pub waiting_label: &'a str,
    /// Label currently shown; kept verbatim while still waiting.
    pub previous_label: Option<&'a str>,
}

pub fn derive(inputs: &PresentationInputs<'_>) -> PresentationState {
    let registry = inputs.registry;
    let remote_media = registry.has_remote_media();
    let local_video = registry.local().is_some_and(|p| p.has_video);
    let presenter = inputs.lock.presenter().cloned();

    let state_label = if remote_media {
        None
    } else {
        Some(
            inputs
                .previous_label
                .unwrap_or(inputs.waiting_label)
                .to_string(),
        )
    };

    let roster = registry
        .remotes()
        .map(|p| RosterEntry {
            participant: p.id.clone(),
            status: p.status,
            has_media: p.has_media(),
            presenting: inputs.lock.is_held_by(&p.id),
        })
        .collect();

    PresentationState {
        local_preview_visible: local_video
            && remote_media
            && presenter.is_none()
            && !inputs.minimized,
        full_screen_target: presenter.clone(),
        state_label,
        screen_share_locked: presenter,
        display_mode: inputs.display_mode,
        screen_share_enabled: !inputs.lock.is_locked(),
        roster,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::ParticipantPatch;

    fn id(s: &str) -> ParticipantId {
        ParticipantId::from(s)
    }

    fn derive_with(
        registry: &ParticipantRegistry,
        lock: &ScreenShareLock,
        previous_label: Option<&str>,
    ) -> PresentationState {
        derive(&PresentationInputs {
            registry,
            lock,
            display_mode: DisplayMode::Fill,
            minimized: false,
            waiting_label: "Calling...",
            previous_label,
        })
    }

    #[test]
    fn empty_session_is_waiting() {
        let registry = ParticipantRegistry::new(id("me"));
        let state = derive_with(&registry, &ScreenShareLock::default(), None);
        assert_eq!(state.state_label.as_deref(), Some("Calling..."));
        assert!(!state.local_preview_visible);
        assert!(state.full_screen_target.is_none());
        assert!(state.screen_share_enabled);
        assert!(state.roster.is_empty());
    }

    #[test]
    fn local_preview_needs_local_video_and_remote_media() {
        let mut registry = ParticipantRegistry::new(id("me"));
        let lock = ScreenShareLock::default();

        registry.upsert(&id("me"), ParticipantPatch::video(true));
        assert!(!derive_with(&registry, &lock, None).local_preview_visible);

        registry.upsert(&id("alice"), ParticipantPatch::video(false));
        assert!(!derive_with(&registry, &lock, None).local_preview_visible);

        registry.upsert(&id("alice"), ParticipantPatch::video(true));
        assert!(derive_with(&registry, &lock, None).local_preview_visible);

        registry.upsert(&id("me"), ParticipantPatch::video(false));
        assert!(!derive_with(&registry, &lock, None).local_preview_visible);
    }

    #[test]
    fn lock_sets_full_screen_and_hides_preview() {
        let mut registry = ParticipantRegistry::new(id("me"));
        registry.upsert(&id("me"), ParticipantPatch::video(true));
        registry.upsert(&id("alice"), ParticipantPatch::screen_share(true));
        let mut lock = ScreenShareLock::default();
        lock.acquire(&id("alice"), DisplayMode::Fill).unwrap();

        let state = derive_with(&registry, &lock, None);
        assert_eq!(state.full_screen_target, Some(id("alice")));
        assert_eq!(state.screen_share_locked, Some(id("alice")));
        assert!(!state.local_preview_visible);
        assert!(!state.screen_share_enabled);
        assert!(state.roster[0].presenting);
    }

    #[test]
    fn waiting_label_is_not_overwritten() {
        let registry = ParticipantRegistry::new(id("me"));
        let state = derive_with(&registry, &ScreenShareLock::default(), Some("Ringing"));
        assert_eq!(state.state_label.as_deref(), Some("Ringing"));
    }

    #[test]
    fn label_cleared_with_remote_media() {
        let mut registry = ParticipantRegistry::new(id("me"));
        registry.upsert(&id("alice"), ParticipantPatch::video(true));
        let state = derive_with(&registry, &ScreenShareLock::default(), Some("Calling..."));
        assert!(state.state_label.is_none());
    }

    #[test]
    fn minimized_view_hides_preview() {
        let mut registry = ParticipantRegistry::new(id("me"));
        registry.upsert(&id("me"), ParticipantPatch::video(true));
        registry.upsert(&id("alice"), ParticipantPatch::video(true));
        let state = derive(&PresentationInputs {
            registry: &registry,
            lock: &ScreenShareLock::default(),
            display_mode: DisplayMode::Fit,
            minimized: true,
            waiting_label: "Calling...",
            previous_label: None,
        });
        assert!(!state.local_preview_visible);
        assert_eq!(state.display_mode, DisplayMode::Fit);
    }

    #[test]
    fn roster_lists_retained_participants() {
        let mut registry = ParticipantRegistry::new(id("me"));
        registry.upsert(&id("me"), ParticipantPatch::video(true));
        registry.upsert(&id("alice"), ParticipantPatch::video(true));
        registry.upsert(&id("bob"), ParticipantPatch::video(true));
        registry.mark_inactive(&id("alice"));

        let state = derive_with(&registry, &ScreenShareLock::default(), None);
        assert_eq!(state.roster.len(), 2);
        assert_eq!(state.roster[0].participant, id("alice"));
        assert_eq!(state.roster[0].status, ParticipantStatus::Inactive);
        assert!(!state.roster[0].has_media);
        assert_eq!(state.roster[1].status, ParticipantStatus::Active);
    }

    #[test]
    fn display_mode_from_content_fill() {
        assert_eq!(DisplayMode::from_content_fill(true), DisplayMode::Fill);
        assert_eq!(DisplayMode::from_content_fill(false), DisplayMode::Fit);
    }
}
