//! API request and response types

use recall_core::SchedulerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Re-export shared types from recall-core
pub use recall_core::types::{
    Card, CardId, CardStatus, CardType, NextState, Rating, ReviewEvent,
};

// === Card Types ===

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListCardsQuery {
    pub card_type: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub due_only: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
    pub stats: CardStats,
    pub due_cards: Vec<Card>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub front: String,
    pub back: String,
    pub card_type: Option<CardType>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub front: Option<String>,
    pub back: Option<String>,
    pub card_type: Option<CardType>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub suspended: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCardResponse {
    pub deleted: bool,
}

// === Stats Types ===

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub suspended: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub basic: usize,
    pub cloze: usize,
    pub image: usize,
    pub qa: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    pub total: usize,
    pub due: usize,
    pub due_today: usize,
    pub by_status: StatusCounts,
    pub by_type: TypeCounts,
    /// Percentage of reviews that were not lapses, one decimal place.
    pub retention_rate: f64,
    /// Two decimal places.
    pub average_ease_factor: f64,
}

// === Study Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    /// A rating name (again, hard, good, easy) or its value on the 1-4 scale.
    pub rating: Option<Value>,
    pub response_time_ms: Option<u64>,
}

impl SubmitReviewRequest {
    pub fn parse_rating(&self) -> Result<Rating, SchedulerError> {
        match &self.rating {
            Some(Value::String(name)) => name.parse(),
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| SchedulerError::InvalidRating(number.to_string()))
                .and_then(Rating::try_from),
            Some(other) => Err(SchedulerError::InvalidRating(other.to_string())),
            None => Err(SchedulerError::InvalidRating("missing".to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub card: Card,
    pub review: ReviewEvent,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextCardResponse {
    pub card: Option<Card>,
    pub message: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReviewHistoryQuery {
    pub card_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewHistoryResponse {
    pub reviews: Vec<ReviewEvent>,
}
