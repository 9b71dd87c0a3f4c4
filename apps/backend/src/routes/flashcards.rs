//! Flashcard collection endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::models::*;
use crate::services::stats::{compute_stats, filter_cards};
use crate::services::study::suspension_status;
use crate::AppState;

/// GET /api/flashcards
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListCardsQuery>,
) -> Result<Json<CardListResponse>> {
    let now = Utc::now();
    let all = state.cards.list()?;

    let stats = compute_stats(&all, now);
    let due_cards: Vec<Card> = all.iter().filter(|c| c.is_due(now)).cloned().collect();
    let cards = filter_cards(all, &query, now);

    Ok(Json(CardListResponse {
        total: cards.len(),
        cards,
        stats,
        due_cards,
    }))
}

/// GET /api/flashcards/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Card>> {
    let card = state.cards.get(&CardId::from(id))?;
    Ok(Json(card))
}

/// POST /api/flashcards
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCardRequest>,
) -> Result<Json<Card>> {
    if request.front.trim().is_empty() {
        return Err(ApiError::BadRequest("front is required".to_string()));
    }
    if request.back.trim().is_empty() {
        return Err(ApiError::BadRequest("back is required".to_string()));
    }

    let mut card = Card::new(request.front, request.back, Utc::now());
    card.card_type = request.card_type.unwrap_or_default();
    card.tags = request.tags.unwrap_or_default();
    card.category = request.category;
    card.notes = request.notes;

    let card = state.cards.insert(card)?;
    tracing::info!(card_id = %card.id, "Flashcard created");
    Ok(Json(card))
}

/// PUT /api/flashcards/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateCardRequest>,
) -> Result<Json<Card>> {
    let id = CardId::from(id);

    if matches!(request.front.as_deref(), Some(f) if f.trim().is_empty()) {
        return Err(ApiError::BadRequest("front cannot be empty".to_string()));
    }
    if matches!(request.back.as_deref(), Some(b) if b.trim().is_empty()) {
        return Err(ApiError::BadRequest("back cannot be empty".to_string()));
    }

    let card = state.study.update(&id, |mut card| {
        if let Some(front) = &request.front {
            card.front = front.clone();
        }
        if let Some(back) = &request.back {
            card.back = back.clone();
        }
        if let Some(card_type) = request.card_type {
            card.card_type = card_type;
        }
        if let Some(tags) = &request.tags {
            card.tags = tags.clone();
        }
        if let Some(category) = &request.category {
            card.category = Some(category.clone());
        }
        if let Some(notes) = &request.notes {
            card.notes = Some(notes.clone());
        }
        if let Some(suspended) = request.suspended {
            card.status = suspension_status(&card, suspended);
        }
        Ok(card)
    })?;

    Ok(Json(card))
}

/// DELETE /api/flashcards/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteCardResponse>> {
    let card = state.cards.delete(&CardId::from(id))?;
    tracing::info!(card_id = %card.id, "Flashcard deleted");
    Ok(Json(DeleteCardResponse { deleted: true }))
}
