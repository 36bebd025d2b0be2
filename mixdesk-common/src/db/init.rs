//! Database initialization
//!
//! Creates the canonical schema on first run and opens existing databases
//! idempotently. There is one schema: per-configuration channel parameters
//! live in `establishes` and per-configuration input bindings in `connects`.

use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    // Entity tables (migrations are idempotent - safe to call multiple times)
    create_users_table(&pool).await?;
    create_frequencies_table(&pool).await?;
    create_audio_interfaces_table(&pool).await?;
    create_devices_table(&pool).await?;
    create_inputs_table(&pool).await?;
    create_types_table(&pool).await?;
    create_sources_table(&pool).await?;
    create_channels_table(&pool).await?;
    create_configurations_table(&pool).await?;

    // Association tables
    create_supports_table(&pool).await?;
    create_permits_table(&pool).await?;
    create_classifies_table(&pool).await?;
    create_handles_table(&pool).await?;
    create_personalizes_table(&pool).await?;
    create_establishes_table(&pool).await?;
    create_connects_table(&pool).await?;

    // Seed the common sample rates
    seed_common_frequencies(&pool).await?;

    Ok(pool)
}

/// Open an existing database read-only.
///
/// Used by the CLI, which never writes. Fails with `NotFound` when the
/// database file does not exist rather than silently creating an empty one.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {} (run mixdesk-ui first to initialize it)",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_frequencies_table(pool: &SqlitePool) -> Result<()> {
    // Sample rate in kHz; range check mirrors the repository-level validation
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS frequencies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value REAL NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (value >= 8.0 AND value <= 192.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_audio_interfaces_table(pool: &SqlitePool) -> Result<()> {
    // frequency_id is the currently selected sample rate; the full set of
    // rates an interface can run at lives in the supports table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audio_interfaces (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            short_name TEXT NOT NULL,
            model TEXT NOT NULL,
            commercial_name TEXT NOT NULL,
            price REAL,
            frequency_id INTEGER REFERENCES frequencies(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (price IS NULL OR price >= 0.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_devices_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_inputs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inputs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_types_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sources_table(pool: &SqlitePool) -> Result<()> {
    // A source carries no attributes of its own; its type lives in
    // classifies and its interface compatibility in handles
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sources (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_channels_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS channels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL,
            source_id INTEGER REFERENCES sources(id),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_configurations_table(pool: &SqlitePool) -> Result<()> {
    // Created once with the current date, then edited in place
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS configurations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_supports_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS supports (
            interface_id INTEGER NOT NULL REFERENCES audio_interfaces(id) ON DELETE CASCADE,
            frequency_id INTEGER NOT NULL REFERENCES frequencies(id) ON DELETE CASCADE,
            PRIMARY KEY (interface_id, frequency_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_permits_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS permits (
            interface_id INTEGER NOT NULL REFERENCES audio_interfaces(id) ON DELETE CASCADE,
            input_id INTEGER NOT NULL REFERENCES inputs(id) ON DELETE CASCADE,
            PRIMARY KEY (interface_id, input_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_classifies_table(pool: &SqlitePool) -> Result<()> {
    // source_id is the primary key: a source has at most one type, and
    // re-assignment replaces the prior row
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classifies (
            source_id INTEGER PRIMARY KEY REFERENCES sources(id) ON DELETE CASCADE,
            type_id INTEGER NOT NULL REFERENCES types(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_handles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS handles (
            source_id INTEGER NOT NULL REFERENCES sources(id) ON DELETE CASCADE,
            interface_id INTEGER NOT NULL REFERENCES audio_interfaces(id) ON DELETE CASCADE,
            PRIMARY KEY (source_id, interface_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_personalizes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS personalizes (
            configuration_id INTEGER PRIMARY KEY REFERENCES configurations(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id),
            interface_id INTEGER NOT NULL REFERENCES audio_interfaces(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_personalizes_user ON personalizes(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_establishes_table(pool: &SqlitePool) -> Result<()> {
    // Primary key enforces one parameter row per channel per configuration
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS establishes (
            configuration_id INTEGER NOT NULL REFERENCES configurations(id) ON DELETE CASCADE,
            channel_id INTEGER NOT NULL REFERENCES channels(id) ON DELETE CASCADE,
            volume REAL NOT NULL DEFAULT 0.0,
            solo INTEGER NOT NULL DEFAULT 0,
            mute INTEGER NOT NULL DEFAULT 0,
            link INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (configuration_id, channel_id),
            CHECK (volume >= 0.0 AND volume <= 100.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_connects_table(pool: &SqlitePool) -> Result<()> {
    // Primary key enforces at most one device per input per configuration,
    // which also makes (configuration, device, input) triples unique
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS connects (
            configuration_id INTEGER NOT NULL REFERENCES configurations(id) ON DELETE CASCADE,
            input_id INTEGER NOT NULL REFERENCES inputs(id) ON DELETE CASCADE,
            device_id INTEGER NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
            PRIMARY KEY (configuration_id, input_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed the common digital-audio sample rates (kHz)
async fn seed_common_frequencies(pool: &SqlitePool) -> Result<()> {
    for value in [44.1, 48.0, 88.2, 96.0, 176.4, 192.0] {
        sqlx::query("INSERT OR IGNORE INTO frequencies (value) VALUES (?)")
            .bind(value)
            .execute(pool)
            .await?;
    }

    Ok(())
}
