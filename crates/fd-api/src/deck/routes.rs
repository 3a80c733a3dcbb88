use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use fd_db::{
    models::{Card, Deck},
    repositories::{card as card_repo, deck as deck_repo},
};
use serde_json::{Value, json};

use super::model::{CreateDeck, DECK_NOT_FOUND, DeckPatch, NOT_YOUR_DECK};
use crate::{
    ApiState,
    auth::{AuthUser, ensure_owner},
    error::ApiError,
    validation::{ResourceId, validated},
};

/// Create the deck routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/decks", get(get_all_decks).post(create_deck))
        .route(
            "/decks/{id}",
            get(get_deck_by_id).put(update_deck).delete(delete_deck),
        )
        .route("/decks/{id}/cards", get(get_deck_cards))
}

async fn get_all_decks(State(state): State<ApiState>) -> Result<Json<Vec<Deck>>, ApiError> {
    let decks = deck_repo::list_decks(&state.pool).await?;
    Ok(Json(decks))
}

async fn get_deck_by_id(
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Deck>, ApiError> {
    let deck = deck_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(DECK_NOT_FOUND))?;

    Ok(Json(deck))
}

async fn get_deck_cards(
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Vec<Card>>, ApiError> {
    if deck_repo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(ApiError::NotFound(DECK_NOT_FOUND));
    }

    let cards = card_repo::list_by_deck(&state.pool, id).await?;
    Ok(Json(cards))
}

async fn create_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    payload: Result<Json<CreateDeck>, JsonRejection>,
) -> Result<Json<Deck>, ApiError> {
    let payload = validated(payload)?;
    let title = payload.title.unwrap_or_default();

    let deck = deck_repo::create_deck(
        &state.pool,
        &title,
        payload.description.as_deref(),
        auth_user.id,
    )
    .await?;

    tracing::info!(deck_id = deck.id, user_id = auth_user.id, "deck created");

    Ok(Json(deck))
}

async fn update_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
    payload: Result<Json<DeckPatch>, JsonRejection>,
) -> Result<Json<Deck>, ApiError> {
    let mut deck = deck_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(DECK_NOT_FOUND))?;

    ensure_owner(deck.user_id, &auth_user, NOT_YOUR_DECK)?;

    validated(payload)?.apply(&mut deck);
    let deck = deck_repo::update_deck(&state.pool, &deck).await?;

    tracing::info!(deck_id = deck.id, user_id = auth_user.id, "deck updated");

    Ok(Json(deck))
}

async fn delete_deck(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Value>, ApiError> {
    let deck = deck_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound(DECK_NOT_FOUND))?;

    ensure_owner(deck.user_id, &auth_user, NOT_YOUR_DECK)?;

    deck_repo::delete_deck(&state.pool, deck.id).await?;

    tracing::info!(deck_id = deck.id, user_id = auth_user.id, "deck deleted");

    Ok(Json(json!({ "message": "Deck deleted." })))
}
