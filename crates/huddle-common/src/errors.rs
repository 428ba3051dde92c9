use std::path::PathBuf;

use crate::id::ParticipantId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Rejections raised by the stage components.
///
/// None of these are fatal: the coordinator logs them and keeps the
/// previous state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("participant {0} has left the session")]
    ParticipantLeft(ParticipantId),

    #[error("screen share held by {holder}, rejected start from {requested}")]
    ScreenShareHeld {
        holder: ParticipantId,
        requested: ParticipantId,
    },

    #[error("screen share held by {holder}, rejected stop from {requested}")]
    NotPresenter {
        holder: ParticipantId,
        requested: ParticipantId,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum HuddleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stage(#[from] StageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("script error: {0}")]
    Script(String),

    #[error("{0}")]
    Other(String),
}
