//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::models::*;
use crate::AppState;

/// GET /api/flashcards/next
pub async fn next(State(state): State<AppState>) -> Result<Json<NextCardResponse>> {
    let card = state.study.next_card(Utc::now())?;

    let message = match &card {
        Some(_) => "Next card retrieved successfully",
        None => "No cards due for review",
    };

    Ok(Json(NextCardResponse {
        card,
        message: message.to_string(),
    }))
}

/// POST /api/flashcards/:id/review
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    // Reject unknown ratings before the card is touched
    let rating = payload.parse_rating()?;

    let (card, review) = state.study.submit_review(
        &CardId::from(id),
        rating,
        payload.response_time_ms.unwrap_or(0),
        Utc::now(),
    )?;

    Ok(Json(SubmitReviewResponse { card, review }))
}

/// POST /api/flashcards/:id/reset
pub async fn reset(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Card>> {
    let card = state.study.reset_card(&CardId::from(id), Utc::now())?;
    Ok(Json(card))
}

/// GET /api/reviews
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<ReviewHistoryQuery>,
) -> Result<Json<ReviewHistoryResponse>> {
    let reviews = match query.card_id {
        Some(card_id) => state.review_log.events_for(&CardId::from(card_id)),
        None => state.review_log.all(),
    };
    Ok(Json(ReviewHistoryResponse { reviews }))
}
