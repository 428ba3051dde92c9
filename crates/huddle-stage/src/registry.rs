//! Authoritative participant registry.
//!
//! Maps participant identity to media availability, preserving join order
//! for enumeration. The local participant's id is fixed at construction.

use huddle_common::{ParticipantId, StageError};
use tracing::debug;

use crate::participant::{Participant, ParticipantPatch, ParticipantStatus};

/// What happens to a participant record when they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeparturePolicy {
    Remove,
    /// Keep the record for display, flagged inactive with media cleared.
    MarkInactive,
}

impl DeparturePolicy {
    pub fn from_retain(retain_left_participants: bool) -> Self {
        if retain_left_participants {
            Self::MarkInactive
        } else {
            Self::Remove
        }
    }
}

pub struct ParticipantRegistry {
    local: ParticipantId,
    /// Records in join order; at most one per id.
    participants: Vec<Participant>,
    next_join: u64,
}

impl ParticipantRegistry {
    pub fn new(local: ParticipantId) -> Self {
        Self {
            local,
            participants: Vec::new(),
            next_join: 0,
        }
    }

    pub fn local_id(&self) -> &ParticipantId {
        &self.local
    }

    pub fn is_local(&self, id: &ParticipantId) -> bool {
        &self.local == id
    }

    fn position(&self, id: &ParticipantId) -> Option<usize> {
        self.participants.iter().position(|p| &p.id == id)
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.position(id).is_some()
    }

    pub fn local(&self) -> Option<&Participant> {
        self.get(&self.local)
    }

    /// Look up a participant that is still in the session.
    pub fn ensure_active(&self, id: &ParticipantId) -> Result<&Participant, StageError> {
        let participant = self
            .get(id)
            .ok_or_else(|| StageError::UnknownParticipant(id.clone()))?;
        if !participant.is_active() {
            return Err(StageError::ParticipantLeft(id.clone()));
        }
        Ok(participant)
    }

    /// Merge `patch` into the record for `id`, creating it if absent.
    ///
    /// A retained inactive record is re-activated in place, keeping its
    /// join order.
    pub fn upsert(&mut self, id: &ParticipantId, patch: ParticipantPatch) -> &Participant {
        let index = match self.position(id) {
            Some(index) => index,
            None => {
                let participant = Participant::new(id.clone(), self.is_local(id), self.next_join);
                self.next_join += 1;
                self.participants.push(participant);
                self.participants.len() - 1
            }
        };

        let participant = &mut self.participants[index];
        if participant.status == ParticipantStatus::Inactive {
            debug!(participant = %id, "re-activating retained participant");
            participant.status = ParticipantStatus::Active;
        }
        patch.apply(participant);
        &*participant
    }

    /// Merge `patch` into an existing, active record.
    pub fn update(
        &mut self,
        id: &ParticipantId,
        patch: ParticipantPatch,
    ) -> Result<&Participant, StageError> {
        self.ensure_active(id)?;
        let index = self
            .position(id)
            .ok_or_else(|| StageError::UnknownParticipant(id.clone()))?;
        let participant = &mut self.participants[index];
        patch.apply(participant);
        Ok(&*participant)
    }

    pub fn remove(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.position(id)?;
        Some(self.participants.remove(index))
    }

    /// Flag an active participant as left, clearing their media. Returns
    /// false when the id is unknown or already inactive.
    pub fn mark_inactive(&mut self, id: &ParticipantId) -> bool {
        match self.participants.iter_mut().find(|p| &p.id == id) {
            Some(participant) if participant.is_active() => {
                participant.status = ParticipantStatus::Inactive;
                participant.has_video = false;
                participant.has_screen_share = false;
                true
            }
            _ => false,
        }
    }

    /// Apply the departure policy for `id`. Returns whether a record changed.
    pub fn depart(&mut self, id: &ParticipantId, policy: DeparturePolicy) -> bool {
        match policy {
            DeparturePolicy::Remove => self.remove(id).is_some(),
            DeparturePolicy::MarkInactive => self.mark_inactive(id),
        }
    }

    /// Active remote participants with a video or screen-share track, in
    /// join order.
    pub fn active_with_media(&self) -> Vec<&Participant> {
        self.remotes()
            .filter(|p| p.is_active() && p.has_media())
            .collect()
    }

    /// All remote records, active or retained, in join order.
    pub fn remotes(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| !p.is_local)
    }

    pub fn has_remote_media(&self) -> bool {
        self.remotes().any(|p| p.is_active() && p.has_media())
    }

    /// True iff no active remote participant is registered.
    pub fn is_empty(&self) -> bool {
        !self.remotes().any(Participant::is_active)
    }

    /// Number of records, including the local participant and retained ones.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}
