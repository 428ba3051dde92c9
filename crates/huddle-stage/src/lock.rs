//! Screen-share exclusivity.
//!
//! At most one remote presenter holds the lock. A competing start is
//! rejected rather than silently switching presenters; the holder must
//! stop (or leave) first.

use huddle_common::{ParticipantId, StageError};

use crate::presentation::DisplayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition {
    Acquired,
    AlreadyHeld,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenShareLock {
    #[default]
    Unlocked,
    Locked {
        presenter: ParticipantId,
        /// Speaker view mode to restore once the share ends.
        restore_mode: DisplayMode,
    },
}

impl ScreenShareLock {
    pub fn acquire(
        &mut self,
        presenter: &ParticipantId,
        restore_mode: DisplayMode,
    ) -> Result<LockTransition, StageError> {
        match self {
            Self::Unlocked => {
                *self = Self::Locked {
                    presenter: presenter.clone(),
                    restore_mode,
                };
                Ok(LockTransition::Acquired)
            }
            Self::Locked { presenter: held, .. } if held == presenter => {
                Ok(LockTransition::AlreadyHeld)
            }
            Self::Locked { presenter: held, .. } => Err(StageError::ScreenShareHeld {
                holder: held.clone(),
                requested: presenter.clone(),
            }),
        }
    }

    /// Unlock if `presenter` holds the lock, returning the saved display
    /// mode. `Ok(None)` when nothing was locked.
    pub fn release(&mut self, presenter: &ParticipantId) -> Result<Option<DisplayMode>, StageError> {
        match self {
            Self::Unlocked => Ok(None),
            Self::Locked {
                presenter: held,
                restore_mode,
            } if held == presenter => {
                let mode = *restore_mode;
                *self = Self::Unlocked;
                Ok(Some(mode))
            }
            Self::Locked { presenter: held, .. } => Err(StageError::NotPresenter {
                holder: held.clone(),
                requested: presenter.clone(),
            }),
        }
    }

    pub fn presenter(&self) -> Option<&ParticipantId> {
        match self {
            Self::Unlocked => None,
            Self::Locked { presenter, .. } => Some(presenter),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    pub fn is_held_by(&self, id: &ParticipantId) -> bool {
        self.presenter() == Some(id)
    }

    pub fn clear(&mut self) {
        *self = Self::Unlocked;
    }
}
