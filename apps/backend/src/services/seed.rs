//! Demo deck loaded when SEED_DEMO_CARDS is enabled.

use chrono::{DateTime, Duration, TimeZone, Utc};
use recall_core::{Card, CardId, CardStatus, CardType};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

/// Four sample cards in different scheduling states, due relative to `now`.
pub fn demo_cards(now: DateTime<Utc>) -> Vec<Card> {
    vec![
        Card {
            id: CardId::from("1"),
            front: "What is the Zettelkasten method?".to_string(),
            back: "A personal tool for thinking and writing that creates a web of thought \
                   where ideas are connected and can grow organically. Key principles include \
                   atomicity, link density, and unique identifiers."
                .to_string(),
            card_type: CardType::Basic,
            status: CardStatus::Review,
            interval: 7,
            ease_factor: 2.5,
            review_count: 5,
            lapse_count: 0,
            due_date: now + Duration::days(2),
            last_reviewed_at: Some(utc(2024, 1, 20, 14, 45)),
            tags: tags(&["knowledge-management", "productivity"]),
            category: Some("Learning".to_string()),
            notes: None,
            created_at: utc(2024, 1, 1, 10, 30),
            revision: 0,
        },
        Card {
            id: CardId::from("2"),
            front: "What are the four laws of behavior change from Atomic Habits?".to_string(),
            back: "1) Make it obvious, 2) Make it attractive, 3) Make it easy, \
                   4) Make it satisfying"
                .to_string(),
            card_type: CardType::Basic,
            status: CardStatus::Learning,
            interval: 1,
            ease_factor: 2.0,
            review_count: 2,
            lapse_count: 1,
            due_date: now - Duration::days(1),
            last_reviewed_at: Some(utc(2024, 1, 18, 11, 30)),
            tags: tags(&["habits", "productivity", "psychology"]),
            category: Some("Personal Development".to_string()),
            notes: None,
            created_at: utc(2024, 1, 5, 9, 15),
            revision: 0,
        },
        Card {
            id: CardId::from("3"),
            front: "What is the {{Pomodoro Technique}}?".to_string(),
            back: "A time management method that uses a timer to break work into intervals, \
                   traditionally 25 minutes in length, separated by short breaks."
                .to_string(),
            card_type: CardType::Cloze,
            status: CardStatus::New,
            interval: 0,
            ease_factor: 2.5,
            review_count: 0,
            lapse_count: 0,
            due_date: now,
            last_reviewed_at: None,
            tags: tags(&["productivity", "time-management"]),
            category: Some("Productivity".to_string()),
            notes: None,
            created_at: utc(2024, 1, 25, 14, 20),
            revision: 0,
        },
        Card {
            id: CardId::from("4"),
            front: "Name the three types of notes in the Zettelkasten method".to_string(),
            back: "1) Fleeting notes - quick thoughts and ideas, 2) Literature notes - notes \
                   from reading and sources, 3) Permanent notes - core insights and understanding"
                .to_string(),
            card_type: CardType::Qa,
            status: CardStatus::Review,
            interval: 14,
            ease_factor: 2.3,
            review_count: 8,
            lapse_count: 1,
            due_date: now + Duration::days(5),
            last_reviewed_at: Some(utc(2024, 1, 15, 14, 45)),
            tags: tags(&["note-taking", "knowledge-management"]),
            category: Some("Learning".to_string()),
            notes: None,
            created_at: utc(2023, 12, 15, 10, 30),
            revision: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::Scheduler;

    #[test]
    fn test_demo_cards_are_valid_scheduler_input() {
        let now = Utc::now();
        let scheduler = Scheduler::default();
        for card in demo_cards(now) {
            assert!(scheduler
                .compute_next_state(&card, recall_core::Rating::Good, now)
                .is_ok());
        }
    }

    #[test]
    fn test_two_demo_cards_are_due() {
        let now = Utc::now();
        let due = demo_cards(now).iter().filter(|c| c.is_due(now)).count();
        assert_eq!(due, 2);
    }
}
