//! Core types for the review scheduler.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SchedulerError;

/// Ease factor assigned to new and reset cards.
pub const INITIAL_EASE: f64 = 2.5;
/// Lowest ease factor a card may carry.
pub const MIN_EASE: f64 = 1.3;
/// Highest ease factor a card may carry.
pub const MAX_EASE: f64 = 2.5;

/// Opaque, stable card identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Card learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Suspended,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Learning => "learning",
            Self::Review => "review",
            Self::Suspended => "suspended",
        }
    }
}

/// Kind of card, used for presentation and filtering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Basic,
    Cloze,
    Image,
    Qa,
}

impl Default for CardType {
    fn default() -> Self {
        Self::Basic
    }
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Cloze => "cloze",
            Self::Image => "image",
            Self::Qa => "qa",
        }
    }
}

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            _ => Err(SchedulerError::InvalidRating(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = SchedulerError;

    /// Create from 4-point numeric value.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(SchedulerError::InvalidRating(other.to_string())),
        }
    }
}

/// A flashcard with its content and scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub card_type: CardType,
    pub status: CardStatus,
    /// Days until the next scheduled review.
    pub interval: u32,
    pub ease_factor: f64,
    pub review_count: u32,
    pub lapse_count: u32,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Write counter maintained by the card store.
    #[serde(default)]
    pub revision: u64,
}

impl Card {
    /// Create a never-reviewed card that is due immediately.
    pub fn new(front: impl Into<String>, back: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: CardId::generate(),
            front: front.into(),
            back: back.into(),
            card_type: CardType::default(),
            status: CardStatus::New,
            interval: 0,
            ease_factor: INITIAL_EASE,
            review_count: 0,
            lapse_count: 0,
            due_date: now,
            last_reviewed_at: None,
            tags: Vec::new(),
            category: None,
            notes: None,
            created_at: now,
            revision: 0,
        }
    }

    /// A card exactly at its due instant counts as due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }

    /// Apply the outcome of a review.
    pub fn apply(&mut self, next: &NextState) {
        self.interval = next.interval;
        self.ease_factor = next.ease_factor;
        self.due_date = next.due_date;
        self.status = next.status;
        self.review_count = next.review_count;
        self.lapse_count = next.lapse_count;
        self.last_reviewed_at = Some(next.last_reviewed_at);
    }
}

/// Scheduling fields produced by a single review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextState {
    pub interval: u32,
    pub ease_factor: f64,
    pub due_date: DateTime<Utc>,
    pub status: CardStatus,
    pub review_count: u32,
    pub lapse_count: u32,
    pub last_reviewed_at: DateTime<Utc>,
}

/// Log entry describing one completed review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    pub id: Uuid,
    pub card_id: CardId,
    pub rating: Rating,
    pub response_time_ms: u64,
    pub reviewed_at: DateTime<Utc>,
    pub interval: u32,
    pub ease_factor: f64,
}

impl ReviewEvent {
    pub fn new(card_id: CardId, rating: Rating, response_time_ms: u64, next: &NextState) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id,
            rating,
            response_time_ms,
            reviewed_at: next.last_reviewed_at,
            interval: next.interval,
            ease_factor: next.ease_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    #[test]
    fn rating_parses_known_names() {
        assert_eq!("again".parse::<Rating>().unwrap(), Rating::Again);
        assert_eq!(" Hard ".parse::<Rating>().unwrap(), Rating::Hard);
        assert_eq!("GOOD".parse::<Rating>().unwrap(), Rating::Good);
        assert_eq!("easy".parse::<Rating>().unwrap(), Rating::Easy);
    }

    #[test]
    fn rating_rejects_unknown_name() {
        let err = "bogus".parse::<Rating>().unwrap_err();
        assert_eq!(err, SchedulerError::InvalidRating("bogus".to_string()));
    }

    #[test]
    fn rating_numeric_scale() {
        for (value, rating) in (1u8..=4).zip(Rating::ALL) {
            assert_eq!(Rating::try_from(value).unwrap(), rating);
        }
        assert!(matches!(
            Rating::try_from(0),
            Err(SchedulerError::InvalidRating(_))
        ));
        assert!(matches!(
            Rating::try_from(5),
            Err(SchedulerError::InvalidRating(_))
        ));
    }

    #[test]
    fn rating_serde_rejects_unknown_variant() {
        assert_eq!(
            serde_json::from_str::<Rating>("\"good\"").unwrap(),
            Rating::Good
        );
        assert!(serde_json::from_str::<Rating>("\"bogus\"").is_err());
    }

    #[test]
    fn new_card_is_due_immediately() {
        let now = at(1);
        let card = Card::new("front", "back", now);
        assert_eq!(card.status, CardStatus::New);
        assert_eq!(card.interval, 0);
        assert_eq!(card.ease_factor, INITIAL_EASE);
        assert_eq!(card.review_count, 0);
        assert_eq!(card.lapse_count, 0);
        assert!(card.last_reviewed_at.is_none());
        assert!(card.is_due(now));
        assert!(!card.is_due(now - chrono::Duration::seconds(1)));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(CardId::generate(), CardId::generate());
    }

    #[test]
    fn apply_copies_next_state() {
        let mut card = Card::new("q", "a", at(1));
        let next = NextState {
            interval: 6,
            ease_factor: 2.35,
            due_date: at(7),
            status: CardStatus::Review,
            review_count: 3,
            lapse_count: 1,
            last_reviewed_at: at(1),
        };
        card.apply(&next);
        assert_eq!(card.interval, 6);
        assert_eq!(card.ease_factor, 2.35);
        assert_eq!(card.due_date, at(7));
        assert_eq!(card.status, CardStatus::Review);
        assert_eq!(card.review_count, 3);
        assert_eq!(card.lapse_count, 1);
        assert_eq!(card.last_reviewed_at, Some(at(1)));
    }

    #[test]
    fn card_rejects_negative_interval_on_deserialize() {
        let json = r#"{
            "id": "1", "front": "q", "back": "a", "status": "review",
            "interval": -3, "ease_factor": 2.5, "review_count": 1, "lapse_count": 0,
            "due_date": "2024-03-01T09:00:00Z", "created_at": "2024-03-01T09:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }

    #[test]
    fn card_rejects_unknown_status_on_deserialize() {
        let json = r#"{
            "id": "1", "front": "q", "back": "a", "status": "archived",
            "interval": 3, "ease_factor": 2.5, "review_count": 1, "lapse_count": 0,
            "due_date": "2024-03-01T09:00:00Z", "created_at": "2024-03-01T09:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Card>(json).is_err());
    }
}
