//! Core review-scheduling library shared by the backend.
//!
//! Provides:
//! - SM-2 style scheduler (next state, due-card selection, reset)
//! - Card store and review log seams with in-memory implementations
//! - Shared types (Card, CardStatus, Rating, NextState, ReviewEvent)

pub mod error;
pub mod scheduler;
pub mod store;
pub mod types;

pub use error::{Result, SchedulerError, StoreError};
pub use scheduler::Scheduler;
pub use store::{CardStore, MemoryCardStore, MemoryReviewLog, ReviewLog, StoreResult};
pub use types::{
    Card, CardId, CardStatus, CardType, NextState, Rating, ReviewEvent, INITIAL_EASE, MAX_EASE,
    MIN_EASE,
};
