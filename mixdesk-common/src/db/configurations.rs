//! Configuration repository
//!
//! A configuration is a saved snapshot: one owner and interface (via
//! `personalizes`), a set of per-channel parameter rows (`establishes`) and
//! a set of input-device bindings (`connects`). Association updates are
//! delete-all / reinsert-all for the configuration id - replace, never
//! merge.

use crate::db::models::{
    ChannelParams, ChannelParamsUpdate, ChannelState, Configuration, ConfigurationDetail,
    InputBinding, InputBindingUpdate,
};
use crate::db::{frequencies, interfaces, users};
use crate::{Error, Result};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Configuration>> {
    let configurations = sqlx::query_as::<_, Configuration>(
        "SELECT id, created_at FROM configurations ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(configurations)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Configuration> {
    sqlx::query_as::<_, Configuration>("SELECT id, created_at FROM configurations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("configuration {}", id)))
}

/// All configurations saved by a user, newest first
pub async fn get_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Configuration>> {
    let configurations = sqlx::query_as::<_, Configuration>(
        "SELECT c.id, c.created_at
         FROM configurations c
         JOIN personalizes p ON p.configuration_id = c.id
         WHERE p.user_id = ?
         ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(configurations)
}

/// The user's most recently saved configuration
pub async fn latest_for_user(pool: &SqlitePool, user_id: i64) -> Result<Configuration> {
    sqlx::query_as::<_, Configuration>(
        "SELECT c.id, c.created_at
         FROM configurations c
         JOIN personalizes p ON p.configuration_id = c.id
         WHERE p.user_id = ?
         ORDER BY c.created_at DESC, c.id DESC
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("no configurations for user {}", user_id)))
}

/// All configurations using a given audio interface, newest first
pub async fn get_for_interface(pool: &SqlitePool, interface_id: i64) -> Result<Vec<Configuration>> {
    let configurations = sqlx::query_as::<_, Configuration>(
        "SELECT c.id, c.created_at
         FROM configurations c
         JOIN personalizes p ON p.configuration_id = c.id
         WHERE p.interface_id = ?
         ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(interface_id)
    .fetch_all(pool)
    .await?;

    Ok(configurations)
}

/// Assemble the full detail for one configuration: owner and interface via
/// `personalizes`, channel states via `establishes`, input bindings via
/// `connects`.
pub async fn get_detail(pool: &SqlitePool, id: i64) -> Result<ConfigurationDetail> {
    let configuration = get_by_id(pool, id).await?;

    let (user_id, interface_id) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT user_id, interface_id FROM personalizes WHERE configuration_id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("configuration {} has no owner", id)))?;

    let user = users::get_by_id(pool, user_id).await?;
    let interface = interfaces::get_by_id(pool, interface_id).await?;

    let frequency = match interface.frequency_id {
        Some(frequency_id) => Some(frequencies::get_by_id(pool, frequency_id).await?),
        None => None,
    };

    let channels = get_channels(pool, id).await?;
    let inputs = get_inputs(pool, id).await?;

    Ok(ConfigurationDetail {
        id: configuration.id,
        created_at: configuration.created_at,
        user,
        interface,
        frequency,
        channels,
        inputs,
    })
}

/// Channel states for a configuration: one row per `establishes` entry,
/// with the source type name resolved through `classifies`
pub async fn get_channels(pool: &SqlitePool, id: i64) -> Result<Vec<ChannelState>> {
    let rows = sqlx::query_as::<_, (i64, String, Option<String>, f64, bool, bool, bool)>(
        "SELECT c.id, c.label, t.name, e.volume, e.solo, e.mute, e.link
         FROM establishes e
         JOIN channels c ON c.id = e.channel_id
         LEFT JOIN classifies cl ON cl.source_id = c.source_id
         LEFT JOIN types t ON t.id = cl.type_id
         WHERE e.configuration_id = ?
         ORDER BY c.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, label, source_type, volume, solo, mute, link)| ChannelState {
            id,
            label,
            source_type,
            volume,
            solo,
            mute,
            link,
        })
        .collect())
}

/// Input-device bindings for a configuration
pub async fn get_inputs(pool: &SqlitePool, id: i64) -> Result<Vec<InputBinding>> {
    let rows = sqlx::query_as::<_, (i64, String, i64, String, Option<String>)>(
        "SELECT i.id, i.label, d.id, d.name, d.description
         FROM connects cn
         JOIN inputs i ON i.id = cn.input_id
         JOIN devices d ON d.id = cn.device_id
         WHERE cn.configuration_id = ?
         ORDER BY i.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(input_id, input_label, device_id, device_name, device_description)| InputBinding {
                input_id,
                input_label,
                device_id,
                device_name,
                device_description,
            },
        )
        .collect())
}

/// Save a new configuration snapshot. The date defaults to now; the
/// ownership row and all association rows are written in one transaction.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    interface_id: i64,
    channels: &[ChannelParamsUpdate],
    inputs: &[InputBindingUpdate],
) -> Result<i64> {
    validate_channel_params(channels)?;

    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO configurations DEFAULT VALUES")
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    sqlx::query(
        "INSERT INTO personalizes (configuration_id, user_id, interface_id) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(user_id)
    .bind(interface_id)
    .execute(&mut *tx)
    .await?;

    insert_channel_rows(&mut tx, id, channels).await?;
    insert_input_rows(&mut tx, id, inputs).await?;

    tx.commit().await?;
    Ok(id)
}

/// Edit a configuration in place: ownership is rewritten and both
/// association sets are deleted and reinserted wholesale.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    interface_id: i64,
    channels: &[ChannelParamsUpdate],
    inputs: &[InputBindingUpdate],
) -> Result<()> {
    validate_channel_params(channels)?;

    // Fail before touching anything when the configuration is missing
    get_by_id(pool, id).await?;

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT OR REPLACE INTO personalizes (configuration_id, user_id, interface_id)
         VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(user_id)
    .bind(interface_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM establishes WHERE configuration_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_channel_rows(&mut tx, id, channels).await?;

    sqlx::query("DELETE FROM connects WHERE configuration_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_input_rows(&mut tx, id, inputs).await?;

    tx.commit().await?;
    Ok(())
}

/// Remove a configuration and all its association rows (FK cascade)
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM configurations WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("configuration {}", id)));
    }

    Ok(())
}

/// Parameter row for one (configuration, channel) pair
pub async fn get_channel_params(
    pool: &SqlitePool,
    configuration_id: i64,
    channel_id: i64,
) -> Result<ChannelParams> {
    sqlx::query_as::<_, ChannelParams>(
        "SELECT volume, solo, mute, link FROM establishes
         WHERE configuration_id = ? AND channel_id = ?",
    )
    .bind(configuration_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        Error::NotFound(format!(
            "no parameters for channel {} in configuration {}",
            channel_id, configuration_id
        ))
    })
}

/// Targeted volume adjustment, leaving solo/mute/link untouched
pub async fn set_channel_volume(
    pool: &SqlitePool,
    configuration_id: i64,
    channel_id: i64,
    volume: f64,
) -> Result<()> {
    if !is_valid_volume(volume) {
        return Err(Error::InvalidInput(format!(
            "volume {} outside valid range 0-100",
            volume
        )));
    }

    let result = sqlx::query(
        "UPDATE establishes SET volume = ?
         WHERE configuration_id = ? AND channel_id = ?",
    )
    .bind(volume)
    .bind(configuration_id)
    .bind(channel_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!(
            "no parameters for channel {} in configuration {}",
            channel_id, configuration_id
        )));
    }

    Ok(())
}

fn is_valid_volume(volume: f64) -> bool {
    (0.0..=100.0).contains(&volume)
}

fn validate_channel_params(channels: &[ChannelParamsUpdate]) -> Result<()> {
    for channel in channels {
        if !is_valid_volume(channel.volume) {
            return Err(Error::InvalidInput(format!(
                "volume {} for channel {} outside valid range 0-100",
                channel.volume, channel.channel_id
            )));
        }
    }

    Ok(())
}

async fn insert_channel_rows(
    tx: &mut Transaction<'_, Sqlite>,
    configuration_id: i64,
    channels: &[ChannelParamsUpdate],
) -> Result<()> {
    for channel in channels {
        sqlx::query(
            "INSERT INTO establishes (configuration_id, channel_id, volume, solo, mute, link)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(configuration_id)
        .bind(channel.channel_id)
        .bind(channel.volume)
        .bind(channel.solo)
        .bind(channel.mute)
        .bind(channel.link)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

async fn insert_input_rows(
    tx: &mut Transaction<'_, Sqlite>,
    configuration_id: i64,
    inputs: &[InputBindingUpdate],
) -> Result<()> {
    for input in inputs {
        sqlx::query(
            "INSERT INTO connects (configuration_id, input_id, device_id) VALUES (?, ?, ?)",
        )
        .bind(configuration_id)
        .bind(input.input_id)
        .bind(input.device_id)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_range() {
        assert!(is_valid_volume(0.0));
        assert!(is_valid_volume(100.0));
        assert!(!is_valid_volume(-0.1));
        assert!(!is_valid_volume(100.1));
    }
}
