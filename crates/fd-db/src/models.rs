use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account.
///
/// Not `Serialize`: the password hash never leaves the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Deck model - a user-owned collection of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Deck {
    /// Unique deck identifier
    pub id: i64,
    /// Deck title (max 255 chars)
    pub title: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Owner of the deck
    pub user_id: i64,
    /// When the deck was created
    pub created_at: DateTime<Utc>,
    /// When the deck was last updated
    pub updated_at: DateTime<Utc>,
}

/// Card model - one front/back pair inside a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Card {
    /// Unique card identifier
    pub id: i64,
    /// Deck this card belongs to (indexed)
    pub deck_id: i64,
    /// Prompt side (max 500 chars)
    pub front: String,
    /// Answer side (max 500 chars)
    pub back: String,
    /// When the card was created
    pub created_at: DateTime<Utc>,
    /// When the card was last updated
    pub updated_at: DateTime<Utc>,
}
