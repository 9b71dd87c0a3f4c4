//! Test fixtures and factory functions for creating test data.

use chrono::{Duration, Utc};
use serde_json::json;

use recall_core::{Card, CardId};

/// Create a card with a fixed id, due `due_in_days` from now.
pub fn card(id: &str, interval: u32, ease_factor: f64, due_in_days: i64) -> Card {
    let now = Utc::now();
    let mut card = Card::new(format!("Question {id}?"), format!("Answer {id}."), now);
    card.id = CardId::from(id);
    card.interval = interval;
    card.ease_factor = ease_factor;
    card.due_date = now + Duration::days(due_in_days);
    card
}

/// Create a card request body.
pub fn create_card_request(front: &str, back: &str) -> serde_json::Value {
    json!({ "front": front, "back": back })
}

/// Create a submit review request body.
pub fn review_request(rating: &str) -> serde_json::Value {
    json!({ "rating": rating, "response_time_ms": 2500 })
}
