//! Card storage and review log seams, with in-memory implementations.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::types::{Card, CardId, CardStatus, NextState, ReviewEvent};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keyed collection of cards.
///
/// Writes are checked against the card's `revision`: a writer that read an
/// older revision gets [`StoreError::Conflict`] and must re-read.
pub trait CardStore: Send + Sync {
    /// All cards, oldest first.
    fn list(&self) -> StoreResult<Vec<Card>>;

    /// Cards with `due_date <= now`, excluding suspended ones, earliest due first.
    fn find_due(&self, now: DateTime<Utc>) -> StoreResult<Vec<Card>>;

    fn get(&self, id: &CardId) -> StoreResult<Card>;

    fn insert(&self, card: Card) -> StoreResult<Card>;

    /// Replace a card wholesale. `card.revision` must match the stored revision.
    fn replace(&self, card: Card) -> StoreResult<Card>;

    /// Apply a review outcome to the card stored under `id`.
    fn save(&self, id: &CardId, expected_revision: u64, next: &NextState) -> StoreResult<Card>;

    fn delete(&self, id: &CardId) -> StoreResult<Card>;
}

/// Append-only record of reviews.
pub trait ReviewLog: Send + Sync {
    fn append(&self, event: ReviewEvent);

    fn events_for(&self, card_id: &CardId) -> Vec<ReviewEvent>;

    fn all(&self) -> Vec<ReviewEvent>;
}

/// Card store backed by a `HashMap` behind a lock.
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `cards`. Later duplicates win.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let cards = cards
            .into_iter()
            .map(|card| (card.id.clone(), Card { revision: 0, ..card }))
            .collect();
        Self {
            cards: RwLock::new(cards),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_revision(stored: &Card, expected: u64) -> StoreResult<()> {
    if stored.revision != expected {
        return Err(StoreError::Conflict {
            id: stored.id.clone(),
            expected,
            actual: stored.revision,
        });
    }
    Ok(())
}

impl CardStore for MemoryCardStore {
    fn list(&self) -> StoreResult<Vec<Card>> {
        let cards = self.cards.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<Card> = cards.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    fn find_due(&self, now: DateTime<Utc>) -> StoreResult<Vec<Card>> {
        let cards = self.cards.read().unwrap_or_else(PoisonError::into_inner);
        let mut due: Vec<Card> = cards
            .values()
            .filter(|card| card.status != CardStatus::Suspended && card.is_due(now))
            .cloned()
            .collect();
        due.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));
        Ok(due)
    }

    fn get(&self, id: &CardId) -> StoreResult<Card> {
        let cards = self.cards.read().unwrap_or_else(PoisonError::into_inner);
        cards
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn insert(&self, card: Card) -> StoreResult<Card> {
        let mut cards = self.cards.write().unwrap_or_else(PoisonError::into_inner);
        if cards.contains_key(&card.id) {
            return Err(StoreError::AlreadyExists(card.id));
        }
        let card = Card { revision: 0, ..card };
        cards.insert(card.id.clone(), card.clone());
        Ok(card)
    }

    fn replace(&self, card: Card) -> StoreResult<Card> {
        let mut cards = self.cards.write().unwrap_or_else(PoisonError::into_inner);
        let stored = cards
            .get_mut(&card.id)
            .ok_or_else(|| StoreError::NotFound(card.id.clone()))?;
        check_revision(stored, card.revision)?;

        let revision = stored.revision + 1;
        *stored = Card { revision, ..card };
        Ok(stored.clone())
    }

    fn save(&self, id: &CardId, expected_revision: u64, next: &NextState) -> StoreResult<Card> {
        let mut cards = self.cards.write().unwrap_or_else(PoisonError::into_inner);
        let stored = cards
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        check_revision(stored, expected_revision)?;

        stored.apply(next);
        stored.revision += 1;
        Ok(stored.clone())
    }

    fn delete(&self, id: &CardId) -> StoreResult<Card> {
        let mut cards = self.cards.write().unwrap_or_else(PoisonError::into_inner);
        cards
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

/// Review log kept in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryReviewLog {
    events: Mutex<Vec<ReviewEvent>>,
}

impl MemoryReviewLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewLog for MemoryReviewLog {
    fn append(&self, event: ReviewEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn events_for(&self, card_id: &CardId) -> Vec<ReviewEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| &event.card_id == card_id)
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<ReviewEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
