//! Input repository

use crate::db::models::Input;
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Input>> {
    let inputs =
        sqlx::query_as::<_, Input>("SELECT id, label, description FROM inputs ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(inputs)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Input> {
    sqlx::query_as::<_, Input>("SELECT id, label, description FROM inputs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("input {}", id)))
}

pub async fn get_by_label(pool: &SqlitePool, label: &str) -> Result<Input> {
    sqlx::query_as::<_, Input>("SELECT id, label, description FROM inputs WHERE label = ?")
        .bind(label)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("input labeled {}", label)))
}

pub async fn insert(pool: &SqlitePool, label: &str, description: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO inputs (label, description) VALUES (?, ?)")
        .bind(label)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, input: &Input) -> Result<()> {
    let result = sqlx::query(
        "UPDATE inputs SET label = ?, description = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&input.label)
    .bind(&input.description)
    .bind(input.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("input {}", input.id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM inputs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("input {}", id)));
    }

    Ok(())
}
