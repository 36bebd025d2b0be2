//! Audio-interface repository
//!
//! Besides plain CRUD, an interface owns two association sets: the sample
//! rates it supports (`supports`) and the inputs it exposes (`permits`).
//! Both are replaced wholesale on update rather than diffed.

use crate::db::models::{AudioInterface, Frequency, Input};
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AudioInterface>> {
    let interfaces = sqlx::query_as::<_, AudioInterface>(
        "SELECT id, short_name, model, commercial_name, price, frequency_id
         FROM audio_interfaces ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(interfaces)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<AudioInterface> {
    sqlx::query_as::<_, AudioInterface>(
        "SELECT id, short_name, model, commercial_name, price, frequency_id
         FROM audio_interfaces WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("audio interface {}", id)))
}

pub async fn insert(
    pool: &SqlitePool,
    short_name: &str,
    model: &str,
    commercial_name: &str,
    price: Option<f64>,
    frequency_id: Option<i64>,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO audio_interfaces (short_name, model, commercial_name, price, frequency_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(short_name)
    .bind(model)
    .bind(commercial_name)
    .bind(price)
    .bind(frequency_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, interface: &AudioInterface) -> Result<()> {
    let result = sqlx::query(
        "UPDATE audio_interfaces
         SET short_name = ?, model = ?, commercial_name = ?, price = ?, frequency_id = ?,
             updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(&interface.short_name)
    .bind(&interface.model)
    .bind(&interface.commercial_name)
    .bind(interface.price)
    .bind(interface.frequency_id)
    .bind(interface.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("audio interface {}", interface.id)));
    }

    Ok(())
}

/// Select the interface's current sample rate
pub async fn set_frequency(pool: &SqlitePool, id: i64, frequency_id: Option<i64>) -> Result<()> {
    let result = sqlx::query(
        "UPDATE audio_interfaces SET frequency_id = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(frequency_id)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("audio interface {}", id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM audio_interfaces WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("audio interface {}", id)));
    }

    Ok(())
}

/// Sample rates this interface can run at
pub async fn get_supported_frequencies(pool: &SqlitePool, id: i64) -> Result<Vec<Frequency>> {
    let frequencies = sqlx::query_as::<_, Frequency>(
        "SELECT f.id, f.value
         FROM frequencies f
         JOIN supports s ON s.frequency_id = f.id
         WHERE s.interface_id = ?
         ORDER BY f.value",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(frequencies)
}

/// Replace the interface's supported sample rates wholesale
pub async fn set_supported_frequencies(
    pool: &SqlitePool,
    id: i64,
    frequency_ids: &[i64],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM supports WHERE interface_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    for frequency_id in frequency_ids {
        sqlx::query("INSERT INTO supports (interface_id, frequency_id) VALUES (?, ?)")
            .bind(id)
            .bind(frequency_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Inputs exposed by this interface
pub async fn get_permitted_inputs(pool: &SqlitePool, id: i64) -> Result<Vec<Input>> {
    let inputs = sqlx::query_as::<_, Input>(
        "SELECT i.id, i.label, i.description
         FROM inputs i
         JOIN permits p ON p.input_id = i.id
         WHERE p.interface_id = ?
         ORDER BY i.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(inputs)
}

/// Replace the interface's permitted inputs wholesale
pub async fn set_permitted_inputs(pool: &SqlitePool, id: i64, input_ids: &[i64]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM permits WHERE interface_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    for input_id in input_ids {
        sqlx::query("INSERT INTO permits (interface_id, input_id) VALUES (?, ?)")
            .bind(id)
            .bind(input_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
