//! Source-type repository

use crate::db::models::SourceType;
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<SourceType>> {
    let types =
        sqlx::query_as::<_, SourceType>("SELECT id, name, description FROM types ORDER BY name")
            .fetch_all(pool)
            .await?;

    Ok(types)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<SourceType> {
    sqlx::query_as::<_, SourceType>("SELECT id, name, description FROM types WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("type {}", id)))
}

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<SourceType> {
    sqlx::query_as::<_, SourceType>("SELECT id, name, description FROM types WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("type named {}", name)))
}

pub async fn insert(pool: &SqlitePool, name: &str, description: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO types (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, source_type: &SourceType) -> Result<()> {
    let result = sqlx::query(
        "UPDATE types SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&source_type.name)
    .bind(&source_type.description)
    .bind(source_type.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("type {}", source_type.id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM types WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("type {}", id)));
    }

    Ok(())
}
