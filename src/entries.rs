//! Entry storage: one SQLite table, single-statement reads and writes.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::keywords::normalize_keywords;
use crate::models::{Entry, EntryInput};

pub async fn create_entry(pool: &SqlitePool, input: &EntryInput) -> Result<i64, sqlx::Error> {
    let keywords = normalize_keywords(input.keywords.as_deref(), &input.content);

    let id = sqlx::query(
        r#"
        INSERT INTO clipboard (title, content, image_path, keywords, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&input.image_path)
    .bind(&keywords)
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::debug!(id, %keywords, "Created entry");
    Ok(id)
}

pub async fn list_entries(pool: &SqlitePool) -> Result<Vec<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>("SELECT * FROM clipboard ORDER BY created_at DESC, id DESC")
        .fetch_all(pool)
        .await
}

/// Entries whose keyword string contains `query` as a literal substring.
///
/// Stored keywords are lowercase, so the query is lowercased too. `instr`
/// is used instead of `LIKE` so `%` and `_` in the query match themselves.
pub async fn search_entries(pool: &SqlitePool, query: &str) -> Result<Vec<Entry>, sqlx::Error> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return list_entries(pool).await;
    }

    sqlx::query_as::<_, Entry>(
        "SELECT * FROM clipboard WHERE instr(keywords, ?) > 0 ORDER BY created_at DESC, id DESC",
    )
    .bind(query)
    .fetch_all(pool)
    .await
}

pub async fn get_entry(pool: &SqlitePool, id: i64) -> Result<Option<Entry>, sqlx::Error> {
    sqlx::query_as::<_, Entry>("SELECT * FROM clipboard WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Overwrites every editable field of entry `id`. Returns the number of rows
/// changed, which is 0 when no such entry exists.
pub async fn update_entry(pool: &SqlitePool, id: i64, input: &EntryInput) -> Result<u64, sqlx::Error> {
    let keywords = normalize_keywords(input.keywords.as_deref(), &input.content);

    let affected = sqlx::query(
        r#"
        UPDATE clipboard
        SET title = ?, content = ?, keywords = ?, image_path = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(&keywords)
    .bind(&input.image_path)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    tracing::debug!(id, affected, "Updated entry");
    Ok(affected)
}

pub async fn delete_entry(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM clipboard WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    tracing::debug!(id, affected, "Deleted entry");
    Ok(affected)
}
