//! SM-2 style review scheduler.
//!
//! A rating moves a card's interval and ease factor:
//!
//! | rating | interval                              | ease        |
//! |--------|---------------------------------------|-------------|
//! | again  | 1                                     | ease - 0.2  |
//! | hard   | max(1, floor(interval * 1.2))         | ease - 0.15 |
//! | good   | 1 if new, else floor(interval * ease) | unchanged   |
//! | easy   | floor(interval * ease * 1.3)          | ease + 0.15 |
//!
//! Ease is kept within `[1.3, 2.5]`. An `easy` rating on a card whose
//! interval is still 0 leaves the interval at 0 and the card in `learning`.

use chrono::{DateTime, Days, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SchedulerError};
use crate::types::{Card, CardStatus, NextState, Rating, INITIAL_EASE, MAX_EASE, MIN_EASE};

/// Scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    pub again_penalty: f64,
    pub hard_penalty: f64,
    pub easy_bonus: f64,
    pub hard_multiplier: f64,
    pub easy_multiplier: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MIN_EASE,
            maximum_ease: MAX_EASE,
            again_penalty: 0.2,
            hard_penalty: 0.15,
            easy_bonus: 0.15,
            hard_multiplier: 1.2,
            easy_multiplier: 1.3,
        }
    }
}

impl Scheduler {
    /// Calculate the scheduling fields that result from rating `card` at `now`.
    ///
    /// The card itself is not modified; apply the result with [`Card::apply`].
    pub fn compute_next_state(
        &self,
        card: &Card,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<NextState> {
        self.validate(card)?;

        let interval0 = f64::from(card.interval);
        let ease0 = card.ease_factor;

        let (interval, ease) = match rating {
            Rating::Again => (1.0, (ease0 - self.again_penalty).max(self.minimum_ease)),
            Rating::Hard => (
                (interval0 * self.hard_multiplier).floor().max(1.0),
                (ease0 - self.hard_penalty).max(self.minimum_ease),
            ),
            Rating::Good => {
                let interval = if card.interval == 0 {
                    1.0
                } else {
                    (interval0 * ease0).floor()
                };
                (interval, ease0)
            }
            Rating::Easy => (
                (interval0 * ease0 * self.easy_multiplier).floor(),
                (ease0 + self.easy_bonus).min(self.maximum_ease),
            ),
        };

        let ease_factor = self.clamp_ease(ease);
        let interval = whole_days(interval)?;
        let due_date = now
            .checked_add_days(Days::new(u64::from(interval)))
            .ok_or_else(|| {
                SchedulerError::InvalidCardState(format!(
                    "interval of {interval} days overflows the calendar"
                ))
            })?;

        let status = if interval > 0 {
            CardStatus::Review
        } else {
            CardStatus::Learning
        };

        let review_count = bump(card.review_count, "review count", card)?;
        let lapse_count = match rating {
            Rating::Again => bump(card.lapse_count, "lapse count", card)?,
            _ => card.lapse_count,
        };

        Ok(NextState {
            interval,
            ease_factor,
            due_date,
            status,
            review_count,
            lapse_count,
            last_reviewed_at: now,
        })
    }

    /// Pick a card to review next, uniformly at random among the due ones.
    ///
    /// Returns `None` when nothing is due.
    pub fn select_due_card<'a, R>(
        &self,
        cards: &'a [Card],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<&'a Card>
    where
        R: Rng + ?Sized,
    {
        let due: Vec<&Card> = cards.iter().filter(|card| card.is_due(now)).collect();
        due.choose(rng).copied()
    }

    /// [`Scheduler::select_due_card`] using the thread-local RNG.
    pub fn select_due_card_now<'a>(&self, cards: &'a [Card], now: DateTime<Utc>) -> Option<&'a Card> {
        self.select_due_card(cards, now, &mut rand::thread_rng())
    }

    /// Return `card` in its creation-time scheduling state.
    ///
    /// Identity, content and metadata are kept; counters are zeroed.
    pub fn reset(&self, card: &Card, now: DateTime<Utc>) -> Card {
        Card {
            status: CardStatus::New,
            interval: 0,
            ease_factor: self.initial_ease,
            review_count: 0,
            lapse_count: 0,
            due_date: now,
            last_reviewed_at: None,
            ..card.clone()
        }
    }

    fn validate(&self, card: &Card) -> Result<()> {
        let ease = card.ease_factor;
        if !ease.is_finite() || ease < self.minimum_ease || ease > self.maximum_ease {
            return Err(SchedulerError::InvalidCardState(format!(
                "ease factor {ease} of card {} is outside [{}, {}]",
                card.id, self.minimum_ease, self.maximum_ease
            )));
        }
        Ok(())
    }

    fn clamp_ease(&self, ease: f64) -> f64 {
        ease.max(self.minimum_ease).min(self.maximum_ease)
    }
}

fn bump(count: u32, what: &str, card: &Card) -> Result<u32> {
    count.checked_add(1).ok_or_else(|| {
        SchedulerError::InvalidCardState(format!("{what} of card {} is saturated", card.id))
    })
}

fn whole_days(interval: f64) -> Result<u32> {
    if interval < 0.0 || interval > f64::from(u32::MAX) {
        return Err(SchedulerError::InvalidCardState(format!(
            "computed interval {interval} is out of range"
        )));
    }
    Ok(interval as u32)
}
