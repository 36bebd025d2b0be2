//! User repository

use crate::db::models::User;
use crate::{Error, Result};
use sqlx::SqlitePool;

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash FROM users ORDER BY email",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {}", id)))
}

pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT id, email, password_hash FROM users WHERE email = ?")
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user with email {}", email)))
}

/// Create a user, returning the new id.
///
/// The email is validated for shape and lowercased before insert; the
/// credential hash is stored as given.
pub async fn create(pool: &SqlitePool, email: &str, password_hash: &str) -> Result<i64> {
    if !is_valid_email(email) {
        return Err(Error::InvalidInput(format!("invalid email: {}", email)));
    }

    let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
        .bind(email.to_lowercase())
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, user: &User) -> Result<()> {
    if !is_valid_email(&user.email) {
        return Err(Error::InvalidInput(format!("invalid email: {}", user.email)));
    }

    let result = sqlx::query(
        "UPDATE users SET email = ?, password_hash = ?, updated_at = CURRENT_TIMESTAMP
         WHERE id = ?",
    )
    .bind(user.email.to_lowercase())
    .bind(&user.password_hash)
    .bind(user.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("user {}", user.id)));
    }

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("user {}", id)));
    }

    Ok(())
}

/// Minimal shape check: one '@' with a dot somewhere after it
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("operator@studio.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@missing.local"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@.leadingdot"));
    }
}
