use thiserror::Error;

use crate::participant::{ParticipantId, Role};

/// Errors surfaced before any weight matrix is built, or while filling it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid participant {id}: {reason}")]
    InvalidInput { id: ParticipantId, reason: String },

    #[error("participant {id} supplied as {found} in the {expected} collection")]
    WrongRole {
        id: ParticipantId,
        expected: Role,
        found: Role,
    },

    #[error("duplicate {role} id {id}")]
    DuplicateId { id: ParticipantId, role: Role },

    #[error("weight undefined for driver {driver} and rider {rider}: {reason}")]
    UndefinedWeight {
        driver: ParticipantId,
        rider: ParticipantId,
        reason: String,
    },
}
