//! Review orchestration: read a card, schedule it, save it, log the review.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use recall_core::{
    Card, CardId, CardStatus, CardStore, Rating, ReviewEvent, ReviewLog, Scheduler, StoreError,
};

use crate::error::{ApiError, Result};

/// Runs scheduler transitions against the card store.
///
/// Every write goes through the store's revision check; when another writer
/// got there first the card is re-read and the transition recomputed, up to
/// `retry_limit` times.
pub struct StudyService {
    cards: Arc<dyn CardStore>,
    review_log: Arc<dyn ReviewLog>,
    scheduler: Scheduler,
    retry_limit: u32,
}

impl StudyService {
    pub fn new(
        cards: Arc<dyn CardStore>,
        review_log: Arc<dyn ReviewLog>,
        scheduler: Scheduler,
        retry_limit: u32,
    ) -> Self {
        Self {
            cards,
            review_log,
            scheduler,
            retry_limit,
        }
    }

    /// Apply a rating to a card and append the review to the log.
    pub fn submit_review(
        &self,
        id: &CardId,
        rating: Rating,
        response_time_ms: u64,
        now: DateTime<Utc>,
    ) -> Result<(Card, ReviewEvent)> {
        let mut attempt = 0;
        loop {
            let current = self.cards.get(id)?;
            let next = self
                .scheduler
                .compute_next_state(&current, rating, now)
                .map_err(|e| {
                    tracing::warn!(card_id = %id, error = %e, "Refusing to schedule card");
                    ApiError::from(e)
                })?;

            match self.cards.save(id, current.revision, &next) {
                Ok(card) => {
                    let event = ReviewEvent::new(id.clone(), rating, response_time_ms, &next);
                    self.review_log.append(event.clone());
                    tracing::info!(
                        card_id = %id,
                        rating = %rating,
                        interval = next.interval,
                        ease_factor = next.ease_factor,
                        "Review recorded"
                    );
                    return Ok((card, event));
                }
                Err(StoreError::Conflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                    tracing::warn!(card_id = %id, attempt, "Concurrent review, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Pick a random due card, or `None` when nothing is due.
    pub fn next_card(&self, now: DateTime<Utc>) -> Result<Option<Card>> {
        let due = self.cards.find_due(now)?;
        Ok(self.scheduler.select_due_card_now(&due, now).cloned())
    }

    /// Return a card to its never-reviewed state.
    pub fn reset_card(&self, id: &CardId, now: DateTime<Utc>) -> Result<Card> {
        let card = self.update(id, |card| Ok(self.scheduler.reset(&card, now)))?;
        tracing::info!(card_id = %id, "Card reset");
        Ok(card)
    }

    /// Read-modify-write a card, retrying on concurrent modification.
    pub fn update<F>(&self, id: &CardId, mut change: F) -> Result<Card>
    where
        F: FnMut(Card) -> Result<Card>,
    {
        let mut attempt = 0;
        loop {
            let current = self.cards.get(id)?;
            let revision = current.revision;
            let mut changed = change(current)?;
            changed.revision = revision;

            match self.cards.replace(changed) {
                Ok(card) => return Ok(card),
                Err(StoreError::Conflict { .. }) if attempt < self.retry_limit => {
                    attempt += 1;
                    tracing::warn!(card_id = %id, attempt, "Concurrent update, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Status a card takes when suspended, or when brought back into rotation.
pub fn suspension_status(card: &Card, suspended: bool) -> CardStatus {
    if suspended {
        CardStatus::Suspended
    } else if card.status != CardStatus::Suspended {
        card.status
    } else if card.interval > 0 {
        CardStatus::Review
    } else if card.review_count > 0 {
        CardStatus::Learning
    } else {
        CardStatus::New
    }
}
