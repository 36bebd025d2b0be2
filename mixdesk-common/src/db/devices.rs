//! Device repository

use crate::db::models::Device;
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Device>> {
    let devices =
        sqlx::query_as::<_, Device>("SELECT id, name, description FROM devices ORDER BY name")
            .fetch_all(pool)
            .await?;

    Ok(devices)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Device> {
    sqlx::query_as::<_, Device>("SELECT id, name, description FROM devices WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("device {}", id)))
}

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Device> {
    sqlx::query_as::<_, Device>("SELECT id, name, description FROM devices WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("device named {}", name)))
}

pub async fn insert(pool: &SqlitePool, name: &str, description: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO devices (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, device: &Device) -> Result<()> {
    let result = sqlx::query(
        "UPDATE devices SET name = ?, description = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&device.name)
    .bind(&device.description)
    .bind(device.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("device {}", device.id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM devices WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("device {}", id)));
    }

    Ok(())
}
