//! Database path resolution
//!
//! The database file location is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `MIXDESK_DATABASE` environment variable
//! 3. TOML config file (`database_path` key)
//! 4. OS-dependent default under the user data directory (fallback)

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable checked when no command-line path is given
pub const DATABASE_ENV_VAR: &str = "MIXDESK_DATABASE";

/// Resolve the database file path following the priority order above.
pub fn resolve_database_path(cli_arg: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(db_path) = config.get("database_path").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(db_path));
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    Ok(default_database_path())
}

/// Get the configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let config_path = dirs::config_dir()
        .map(|d| d.join("mixdesk").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {}",
            config_path.display()
        )))
    }
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mixdesk"))
        .unwrap_or_else(|| PathBuf::from("./mixdesk_data"))
        .join("mixdesk.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let path = resolve_database_path(Some("/tmp/explicit.db")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit.db"));
    }

    #[test]
    fn fallback_ends_with_database_name() {
        let path = resolve_database_path(None).unwrap();
        assert!(path.to_string_lossy().ends_with(".db"));
    }
}
