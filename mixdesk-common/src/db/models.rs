//! Database models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// A sample rate in kHz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Frequency {
    pub id: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AudioInterface {
    pub id: i64,
    pub short_name: String,
    pub model: String,
    pub commercial_name: String,
    pub price: Option<f64>,
    /// Currently selected sample rate
    pub frequency_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A labeled connection point on an interface
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Input {
    pub id: i64,
    pub label: String,
    pub description: Option<String>,
}

/// Classification of a source (the `types` table)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SourceType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Source {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Channel {
    pub id: i64,
    pub label: String,
    pub source_id: Option<i64>,
}

/// A saved snapshot header; associations are resolved separately
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Configuration {
    pub id: i64,
    pub created_at: NaiveDateTime,
}

/// Per-configuration channel parameters (one `establishes` row)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChannelParams {
    pub volume: f64,
    pub solo: bool,
    pub mute: bool,
    pub link: bool,
}

/// A channel with its per-configuration state, as shown in the console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelState {
    pub id: i64,
    pub label: String,
    /// Type name of the channel's source, when the source is classified
    pub source_type: Option<String>,
    pub volume: f64,
    pub solo: bool,
    pub mute: bool,
    pub link: bool,
}

/// A device bound to an input for one configuration (one `connects` row)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBinding {
    pub input_id: i64,
    pub input_label: String,
    pub device_id: i64,
    pub device_name: String,
    pub device_description: Option<String>,
}

/// Fully assembled configuration: owner, interface, channel states and
/// input bindings resolved through the association tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationDetail {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub user: User,
    pub interface: AudioInterface,
    pub frequency: Option<Frequency>,
    pub channels: Vec<ChannelState>,
    pub inputs: Vec<InputBinding>,
}

/// One channel's parameters in a save request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelParamsUpdate {
    pub channel_id: i64,
    pub volume: f64,
    #[serde(default)]
    pub solo: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub link: bool,
}

/// One input-device binding in a save request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBindingUpdate {
    pub input_id: i64,
    pub device_id: i64,
}
