//! Spatial audio placement.
//!
//! Spreads the active remote participants evenly across a forward
//! semicircular sound field. Angles are normalized to the open interval
//! (-1, 1), left to right in join order.

use std::f64::consts::{FRAC_PI_2, PI};

use huddle_common::ParticipantId;
use serde::Serialize;

use crate::participant::Participant;

/// Listener distance applied to every participant.
pub const DEFAULT_DISTANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioPosition {
    pub angle: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub participant: ParticipantId,
    #[serde(flatten)]
    pub position: AudioPosition,
}

/// Per-participant audio placement, in join order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpatialAssignment {
    placements: Vec<Placement>,
}

impl SpatialAssignment {
    pub fn get(&self, id: &ParticipantId) -> Option<AudioPosition> {
        self.placements
            .iter()
            .find(|p| &p.participant == id)
            .map(|p| p.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Normalized angle of slot `index` out of `count`.
///
/// `count` must be at least 1.
pub fn slot_angle(index: usize, count: usize) -> f64 {
    let slice = PI / count as f64;
    (FRAC_PI_2 - (PI - (slice * index as f64 + slice / 2.0))) / FRAC_PI_2
}

/// Assigns positions with a fixed listener distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialAudioPositioner {
    distance: f64,
}

impl SpatialAudioPositioner {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn positions(&self, participants: &[&Participant]) -> SpatialAssignment {
        let count = participants.len();
        let placements = participants
            .iter()
            .enumerate()
            .map(|(index, participant)| Placement {
                participant: participant.id.clone(),
                position: AudioPosition {
                    angle: slot_angle(index, count),
                    distance: self.distance,
                },
            })
            .collect();
        SpatialAssignment { placements }
    }
}

impl Default for SpatialAudioPositioner {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE)
    }
}

/// Positions at [`DEFAULT_DISTANCE`].
pub fn positions(participants: &[&Participant]) -> SpatialAssignment {
    SpatialAudioPositioner::default().positions(participants)
}
