//! Source repository
//!
//! A source carries no attributes of its own: its classification lives in
//! `classifies` (at most one type, replace on re-assignment) and its
//! interface compatibility in `handles`.

use crate::db::models::{AudioInterface, Source, SourceType};
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Source>> {
    let sources = sqlx::query_as::<_, Source>("SELECT id FROM sources ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(sources)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Source> {
    sqlx::query_as::<_, Source>("SELECT id FROM sources WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("source {}", id)))
}

pub async fn insert(pool: &SqlitePool) -> Result<i64> {
    let result = sqlx::query("INSERT INTO sources DEFAULT VALUES")
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM sources WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("source {}", id)));
    }

    Ok(())
}

/// Classify a source. Re-assignment replaces the prior type.
pub async fn set_type(pool: &SqlitePool, source_id: i64, type_id: i64) -> Result<()> {
    sqlx::query("INSERT OR REPLACE INTO classifies (source_id, type_id) VALUES (?, ?)")
        .bind(source_id)
        .bind(type_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn get_type(pool: &SqlitePool, source_id: i64) -> Result<SourceType> {
    sqlx::query_as::<_, SourceType>(
        "SELECT t.id, t.name, t.description
         FROM types t
         JOIN classifies c ON c.type_id = t.id
         WHERE c.source_id = ?",
    )
    .bind(source_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("source {} is unclassified", source_id)))
}

pub async fn clear_type(pool: &SqlitePool, source_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM classifies WHERE source_id = ?")
        .bind(source_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Interfaces this source is compatible with
pub async fn get_handled_interfaces(
    pool: &SqlitePool,
    source_id: i64,
) -> Result<Vec<AudioInterface>> {
    let interfaces = sqlx::query_as::<_, AudioInterface>(
        "SELECT a.id, a.short_name, a.model, a.commercial_name, a.price, a.frequency_id
         FROM audio_interfaces a
         JOIN handles h ON h.interface_id = a.id
         WHERE h.source_id = ?
         ORDER BY a.id",
    )
    .bind(source_id)
    .fetch_all(pool)
    .await?;

    Ok(interfaces)
}

pub async fn add_handled_interface(
    pool: &SqlitePool,
    source_id: i64,
    interface_id: i64,
) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO handles (source_id, interface_id) VALUES (?, ?)")
        .bind(source_id)
        .bind(interface_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn remove_handled_interface(
    pool: &SqlitePool,
    source_id: i64,
    interface_id: i64,
) -> Result<()> {
    sqlx::query("DELETE FROM handles WHERE source_id = ? AND interface_id = ?")
        .bind(source_id)
        .bind(interface_id)
        .execute(pool)
        .await?;

    Ok(())
}
