use sqlx::{Executor, Postgres};

use crate::models::Card;

pub async fn list_cards<'e, E>(executor: E) -> Result<Vec<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, front, back, created_at, updated_at
            FROM cards
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn list_by_deck<'e, E>(executor: E, deck_id: i64) -> Result<Vec<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, front, back, created_at, updated_at
            FROM cards
            WHERE deck_id = $1
            ORDER BY id
        "#,
    )
    .bind(deck_id)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, card_id: i64) -> Result<Option<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, deck_id, front, back, created_at, updated_at
            FROM cards
            WHERE id = $1
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

/// Owner of the deck a card sits in, `None` if the card does not exist.
pub async fn find_owner_id<'e, E>(executor: E, card_id: i64) -> Result<Option<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT d.user_id
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            WHERE c.id = $1
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

pub async fn create_card<'e, E>(
    executor: E,
    deck_id: i64,
    front: &str,
    back: &str,
) -> Result<Card, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO cards (deck_id, front, back)
            VALUES ($1, $2, $3)
            RETURNING id, deck_id, front, back, created_at, updated_at
        "#,
    )
    .bind(deck_id)
    .bind(front)
    .bind(back)
    .fetch_one(executor)
    .await
}

pub async fn update_card<'e, E>(executor: E, card: &Card) -> Result<Card, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE cards
            SET front = $1, back = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, deck_id, front, back, created_at, updated_at
        "#,
    )
    .bind(&card.front)
    .bind(&card.back)
    .bind(card.id)
    .fetch_one(executor)
    .await
}

pub async fn delete_card<'e, E>(executor: E, card_id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM cards WHERE id = $1
        "#,
    )
    .bind(card_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
