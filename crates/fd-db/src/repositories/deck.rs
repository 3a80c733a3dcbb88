use sqlx::{Executor, Postgres};

use crate::models::Deck;

pub async fn list_decks<'e, E>(executor: E) -> Result<Vec<Deck>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM decks
            ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, deck_id: i64) -> Result<Option<Deck>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM decks
            WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .fetch_optional(executor)
    .await
}

pub async fn create_deck<'e, E>(
    executor: E,
    title: &str,
    description: Option<&str>,
    user_id: i64,
) -> Result<Deck, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO decks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id, created_at, updated_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Write back the mutable columns of an already loaded deck.
///
/// Ownership is not part of the update: `user_id` is never rewritten.
pub async fn update_deck<'e, E>(executor: E, deck: &Deck) -> Result<Deck, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE decks
            SET title = $1, description = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, title, description, user_id, created_at, updated_at
        "#,
    )
    .bind(&deck.title)
    .bind(deck.description.as_deref())
    .bind(deck.id)
    .fetch_one(executor)
    .await
}

pub async fn delete_deck<'e, E>(executor: E, deck_id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM decks WHERE id = $1
        "#,
    )
    .bind(deck_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
