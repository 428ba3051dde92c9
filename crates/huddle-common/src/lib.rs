pub mod errors;
pub mod id;

pub use errors::{ConfigError, HuddleError, StageError};
pub use id::{new_id, ParticipantId, SessionId};

pub type Result<T> = std::result::Result<T, HuddleError>;
