//! Collection statistics and list filtering.

use chrono::{DateTime, Duration, Utc};
use recall_core::{Card, CardStatus, CardType};

use crate::models::{CardStats, ListCardsQuery, StatusCounts, TypeCounts};

/// Compute aggregate statistics over every card.
pub fn compute_stats(cards: &[Card], now: DateTime<Utc>) -> CardStats {
    let today_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    let tomorrow_start = today_start + Duration::days(1);

    let mut by_status = StatusCounts::default();
    let mut by_type = TypeCounts::default();
    let mut due = 0;
    let mut due_today = 0;
    let mut total_reviews: u64 = 0;
    let mut total_lapses: u64 = 0;
    let mut ease_sum = 0.0;

    for card in cards {
        match card.status {
            CardStatus::New => by_status.new += 1,
            CardStatus::Learning => by_status.learning += 1,
            CardStatus::Review => by_status.review += 1,
            CardStatus::Suspended => by_status.suspended += 1,
        }
        match card.card_type {
            CardType::Basic => by_type.basic += 1,
            CardType::Cloze => by_type.cloze += 1,
            CardType::Image => by_type.image += 1,
            CardType::Qa => by_type.qa += 1,
        }
        if card.is_due(now) {
            due += 1;
        }
        if card.due_date >= today_start && card.due_date < tomorrow_start {
            due_today += 1;
        }
        total_reviews += u64::from(card.review_count);
        total_lapses += u64::from(card.lapse_count);
        ease_sum += card.ease_factor;
    }

    let retention_rate = if total_reviews > 0 {
        let kept = total_reviews as f64 - total_lapses as f64;
        round_to(kept / total_reviews as f64 * 100.0, 1)
    } else {
        0.0
    };

    let average_ease_factor = if cards.is_empty() {
        0.0
    } else {
        round_to(ease_sum / cards.len() as f64, 2)
    };

    CardStats {
        total: cards.len(),
        due,
        due_today,
        by_status,
        by_type,
        retention_rate,
        average_ease_factor,
    }
}

/// Apply list filters. `"all"` and absent values match everything.
pub fn filter_cards(cards: Vec<Card>, query: &ListCardsQuery, now: DateTime<Utc>) -> Vec<Card> {
    let card_type = active(query.card_type.as_deref());
    let status = active(query.status.as_deref());
    let category = active(query.category.as_deref());
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let due_only = query.due_only.unwrap_or(false);

    cards
        .into_iter()
        .filter(|card| card_type.map_or(true, |t| card.card_type.as_str() == t))
        .filter(|card| status.map_or(true, |s| card.status.as_str() == s))
        .filter(|card| category.map_or(true, |c| card.category.as_deref() == Some(c)))
        .filter(|card| search.as_deref().map_or(true, |needle| matches_search(card, needle)))
        .filter(|card| !due_only || card.is_due(now))
        .collect()
}

fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != "all")
}

fn matches_search(card: &Card, needle: &str) -> bool {
    card.front.to_lowercase().contains(needle)
        || card.back.to_lowercase().contains(needle)
        || card.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap()
    }

    fn card(front: &str, status: CardStatus, card_type: CardType, due_in_hours: i64) -> Card {
        let mut card = Card::new(front, "answer", now());
        card.status = status;
        card.card_type = card_type;
        card.due_date = now() + Duration::hours(due_in_hours);
        card
    }

    #[test]
    fn test_stats_on_empty_collection() {
        let stats = compute_stats(&[], now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.retention_rate, 0.0);
        assert_eq!(stats.average_ease_factor, 0.0);
    }

    #[test]
    fn test_stats_counts() {
        let mut reviewed = card("a", CardStatus::Review, CardType::Basic, -30);
        reviewed.review_count = 8;
        reviewed.lapse_count = 2;
        reviewed.ease_factor = 2.0;
        let learning = card("b", CardStatus::Learning, CardType::Cloze, 6);
        let suspended = card("c", CardStatus::Suspended, CardType::Qa, 48);
        let fresh = card("d", CardStatus::New, CardType::Qa, 0);

        let stats = compute_stats(&[reviewed, learning, suspended, fresh], now());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.due, 2);
        // Due at 18:00 and 12:00 today; yesterday's and the day after's are not.
        assert_eq!(stats.due_today, 2);
        assert_eq!(
            stats.by_status,
            StatusCounts {
                new: 1,
                learning: 1,
                review: 1,
                suspended: 1
            }
        );
        assert_eq!(
            stats.by_type,
            TypeCounts {
                basic: 1,
                cloze: 1,
                image: 0,
                qa: 2
            }
        );
        assert_eq!(stats.retention_rate, 75.0);
        // (2.0 + 2.5 * 3) / 4 = 2.375
        assert_eq!(stats.average_ease_factor, 2.38);
    }

    #[test]
    fn test_filter_by_type_and_status() {
        let cards = vec![
            card("a", CardStatus::Review, CardType::Basic, 0),
            card("b", CardStatus::New, CardType::Cloze, 0),
            card("c", CardStatus::New, CardType::Basic, 0),
        ];
        let query = ListCardsQuery {
            card_type: Some("basic".to_string()),
            status: Some("new".to_string()),
            ..Default::default()
        };
        let filtered = filter_cards(cards.clone(), &query, now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].front, "c");

        let query = ListCardsQuery {
            card_type: Some("all".to_string()),
            status: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_cards(cards, &query, now()).len(), 3);
    }

    #[test]
    fn test_filter_by_search_and_category() {
        let mut tagged = card("Pomodoro", CardStatus::New, CardType::Cloze, 0);
        tagged.tags = vec!["time-management".to_string()];
        tagged.category = Some("Productivity".to_string());
        let mut other = card("Zettelkasten", CardStatus::New, CardType::Basic, 0);
        other.category = Some("Learning".to_string());

        let query = ListCardsQuery {
            search: Some("TIME".to_string()),
            ..Default::default()
        };
        let filtered = filter_cards(vec![tagged.clone(), other.clone()], &query, now());
        assert_eq!(filtered, vec![tagged.clone()]);

        let query = ListCardsQuery {
            category: Some("Learning".to_string()),
            ..Default::default()
        };
        let filtered = filter_cards(vec![tagged, other.clone()], &query, now());
        assert_eq!(filtered, vec![other]);
    }

    #[test]
    fn test_filter_due_only() {
        let due = card("due", CardStatus::Review, CardType::Basic, -1);
        let later = card("later", CardStatus::Review, CardType::Basic, 1);
        let query = ListCardsQuery {
            due_only: Some(true),
            ..Default::default()
        };
        assert_eq!(filter_cards(vec![due.clone(), later], &query, now()), vec![due]);
    }
}
