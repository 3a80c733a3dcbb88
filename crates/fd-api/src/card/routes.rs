use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use fd_db::{
    models::Card,
    repositories::{card as card_repo, deck as deck_repo},
};
use serde_json::{Value, json};

use super::model::{CARD_NOT_FOUND, CardPatch, CreateCard, NOT_YOUR_CARD};
use crate::{
    ApiState,
    auth::{AuthUser, ensure_owner},
    deck::model::{DECK_NOT_FOUND, NOT_YOUR_DECK},
    error::ApiError,
    validation::{ResourceId, validated},
};

/// Create the card routes
///
/// Cards have no owner column: whoever owns the parent deck owns its cards.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/cards", get(get_all_cards).post(create_card))
        .route(
            "/cards/{id}",
            get(get_card_by_id).put(update_card).delete(delete_card),
        )
}

async fn get_all_cards(State(state): State<ApiState>) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = card_repo::list_cards(&state.pool).await?;
    Ok(Json(cards))
}

async fn get_card_by_id(
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Card>, ApiError> {
    let card = card_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    Ok(Json(card))
}

async fn create_card(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    payload: Result<Json<CreateCard>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let payload = validated(payload)?;
    let deck_id = payload.deck_id.unwrap_or_default();

    let deck = deck_repo::find_by_id(&state.pool, deck_id)
        .await?
        .ok_or(ApiError::NotFound(DECK_NOT_FOUND))?;

    ensure_owner(deck.user_id, &auth_user, NOT_YOUR_DECK)?;

    let card = card_repo::create_card(
        &state.pool,
        deck.id,
        &payload.front.unwrap_or_default(),
        &payload.back.unwrap_or_default(),
    )
    .await?;

    tracing::info!(card_id = card.id, deck_id = deck.id, "card created");

    Ok(Json(card))
}

async fn update_card(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
    payload: Result<Json<CardPatch>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let mut card = card_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    let owner_id = card_repo::find_owner_id(&state.pool, card.id)
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;
    ensure_owner(owner_id, &auth_user, NOT_YOUR_CARD)?;

    validated(payload)?.apply(&mut card);
    let card = card_repo::update_card(&state.pool, &card).await?;

    tracing::info!(card_id = card.id, user_id = auth_user.id, "card updated");

    Ok(Json(card))
}

async fn delete_card(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, ApiError> {
    let owner_id = card_repo::find_owner_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    ensure_owner(owner_id, &auth_user, NOT_YOUR_CARD)?;

    card_repo::delete_card(&state.pool, id).await?;

    tracing::info!(card_id = id, user_id = auth_user.id, "card deleted");

    Ok(Json(json!({ "message": "Card deleted." })))
}
