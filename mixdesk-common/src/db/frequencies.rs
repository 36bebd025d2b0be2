//! Frequency repository
//!
//! Values are sample rates in kHz, restricted to the plausible
//! digital-audio range (8-192 kHz) both here and by a schema CHECK.

use crate::db::models::Frequency;
use crate::{Error, Result};
use sqlx::SqlitePool;

/// Valid sample-rate range in kHz
pub fn is_valid_value(value: f64) -> bool {
    (8.0..=192.0).contains(&value)
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Frequency>> {
    let frequencies =
        sqlx::query_as::<_, Frequency>("SELECT id, value FROM frequencies ORDER BY value")
            .fetch_all(pool)
            .await?;

    Ok(frequencies)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Frequency> {
    sqlx::query_as::<_, Frequency>("SELECT id, value FROM frequencies WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("frequency {}", id)))
}

pub async fn get_by_value(pool: &SqlitePool, value: f64) -> Result<Frequency> {
    sqlx::query_as::<_, Frequency>("SELECT id, value FROM frequencies WHERE value = ?")
        .bind(value)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("frequency {} kHz", value)))
}

pub async fn get_in_range(pool: &SqlitePool, min: f64, max: f64) -> Result<Vec<Frequency>> {
    let frequencies = sqlx::query_as::<_, Frequency>(
        "SELECT id, value FROM frequencies WHERE value >= ? AND value <= ? ORDER BY value",
    )
    .bind(min)
    .bind(max)
    .fetch_all(pool)
    .await?;

    Ok(frequencies)
}

pub async fn insert(pool: &SqlitePool, value: f64) -> Result<i64> {
    if !is_valid_value(value) {
        return Err(Error::ConstraintViolation(format!(
            "frequency {} kHz outside valid range 8-192 kHz",
            value
        )));
    }

    let result = sqlx::query("INSERT INTO frequencies (value) VALUES (?)")
        .bind(value)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, frequency: &Frequency) -> Result<()> {
    if !is_valid_value(frequency.value) {
        return Err(Error::ConstraintViolation(format!(
            "frequency {} kHz outside valid range 8-192 kHz",
            frequency.value
        )));
    }

    let result = sqlx::query("UPDATE frequencies SET value = ? WHERE id = ?")
        .bind(frequency.value)
        .bind(frequency.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("frequency {}", frequency.id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM frequencies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("frequency {}", id)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check() {
        assert!(is_valid_value(8.0));
        assert!(is_valid_value(44.1));
        assert!(is_valid_value(192.0));
        assert!(!is_valid_value(7.9));
        assert!(!is_valid_value(192.1));
        assert!(!is_valid_value(-44.1));
    }
}
