//! Channel repository
//!
//! A channel has a label and an optional source. Per-configuration state
//! (volume/solo/mute/link) lives in `establishes`, not here.

use crate::db::models::Channel;
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Channel>> {
    let channels =
        sqlx::query_as::<_, Channel>("SELECT id, label, source_id FROM channels ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(channels)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Channel> {
    sqlx::query_as::<_, Channel>("SELECT id, label, source_id FROM channels WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("channel {}", id)))
}

pub async fn get_by_label(pool: &SqlitePool, label: &str) -> Result<Channel> {
    sqlx::query_as::<_, Channel>("SELECT id, label, source_id FROM channels WHERE label = ?")
        .bind(label)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("channel labeled {}", label)))
}

pub async fn insert(pool: &SqlitePool, label: &str, source_id: Option<i64>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO channels (label, source_id) VALUES (?, ?)")
        .bind(label)
        .bind(source_id)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, channel: &Channel) -> Result<()> {
    let result = sqlx::query(
        "UPDATE channels SET label = ?, source_id = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&channel.label)
    .bind(channel.source_id)
    .bind(channel.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("channel {}", channel.id)));
    }

    Ok(())
}

/// Point a channel at a different source (or detach it with None)
pub async fn set_source(pool: &SqlitePool, id: i64, source_id: Option<i64>) -> Result<()> {
    let result = sqlx::query(
        "UPDATE channels SET source_id = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(source_id)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("channel {}", id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM channels WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("channel {}", id)));
    }

    Ok(())
}
