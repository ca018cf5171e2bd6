use thiserror::Error;
use uuid::Uuid;

/// Closed error type shared by every layer of the board engine.
#[derive(Error, Debug, Clone)]
pub enum BoardError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("version conflict: {originator_id} already has an event at version {version}")]
    VersionConflict { originator_id: Uuid, version: u64 },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("event store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl BoardError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        BoardError::NotFound { kind, id }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        BoardError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
