//! Error types for recall-core.

use thiserror::Error;

use crate::types::CardId;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised by the scheduler for input it refuses to compute from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    #[error("invalid rating: {0}")]
    InvalidRating(String),

    #[error("invalid card state: {0}")]
    InvalidCardState(String),
}

/// Errors raised by card stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("card not found: {0}")]
    NotFound(CardId),

    #[error("card already exists: {0}")]
    AlreadyExists(CardId),

    #[error("card {id} was modified concurrently (expected revision {expected}, found {actual})")]
    Conflict {
        id: CardId,
        expected: u64,
        actual: u64,
    },
}
