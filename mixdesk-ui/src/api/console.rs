//! Console endpoints: load a user's latest configuration, save edits,
//! adjust a single channel volume.
//!
//! Reads are mapped into explicit view-model structs per form section so
//! the page never sees repository internals (credential hashes stay in the
//! repository layer). A user without saved configurations yields
//! `configuration: null` rather than an error - a missing row must never
//! break the page.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDateTime;
use mixdesk_common::db::models::{
    ChannelParams, ChannelParamsUpdate, ChannelState, ConfigurationDetail, Frequency,
    InputBinding, InputBindingUpdate,
};
use mixdesk_common::db::{configurations, interfaces, users};
use mixdesk_common::Error;
use serde::{Deserialize, Serialize};

use crate::api::users::UserSummary;
use crate::api::ApiError;
use crate::AppState;

/// Interface info panel
#[derive(Debug, Serialize)]
pub struct InterfaceView {
    pub id: i64,
    pub short_name: String,
    pub model: String,
    pub commercial_name: String,
    pub price: Option<f64>,
}

/// One loaded configuration, shaped for the form sections
#[derive(Debug, Serialize)]
pub struct ConfigurationView {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub interface: InterfaceView,
    pub frequency: Option<Frequency>,
    pub channels: Vec<ChannelState>,
    pub inputs: Vec<InputBinding>,
}

/// GET /api/users/:id/configuration response
#[derive(Debug, Serialize)]
pub struct ConsoleView {
    pub user: UserSummary,
    pub configuration: Option<ConfigurationView>,
}

impl From<ConfigurationDetail> for ConfigurationView {
    fn from(detail: ConfigurationDetail) -> Self {
        ConfigurationView {
            id: detail.id,
            created_at: detail.created_at,
            interface: InterfaceView {
                id: detail.interface.id,
                short_name: detail.interface.short_name,
                model: detail.interface.model,
                commercial_name: detail.interface.commercial_name,
                price: detail.interface.price,
            },
            frequency: detail.frequency,
            channels: detail.channels,
            inputs: detail.inputs,
        }
    }
}

/// GET /api/users/:id/configuration
///
/// The user's latest saved configuration. 404 only for an unknown user;
/// a user without configurations gets `configuration: null`.
pub async fn user_configuration(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ConsoleView>, ApiError> {
    let user = users::get_by_id(&state.db, user_id).await?;

    let configuration = match configurations::latest_for_user(&state.db, user_id).await {
        Ok(latest) => {
            let detail = configurations::get_detail(&state.db, latest.id).await?;
            Some(ConfigurationView::from(detail))
        }
        Err(Error::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };

    Ok(Json(ConsoleView {
        user: UserSummary {
            id: user.id,
            email: user.email,
        },
        configuration,
    }))
}

/// PUT /api/configurations/:id request body
#[derive(Debug, Deserialize)]
pub struct SaveConfigurationRequest {
    pub user_id: i64,
    pub interface_id: i64,
    /// Newly selected sample rate for the interface, if changed
    pub frequency_id: Option<i64>,
    pub channels: Vec<ChannelParamsUpdate>,
    pub inputs: Vec<InputBindingUpdate>,
}

#[derive(Debug, Serialize)]
pub struct SaveConfigurationResponse {
    pub status: String,
    pub configuration_id: i64,
}

/// PUT /api/configurations/:id
///
/// Full save. Channel and input associations are replaced wholesale,
/// never diffed.
pub async fn save_configuration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SaveConfigurationRequest>,
) -> Result<Json<SaveConfigurationResponse>, ApiError> {
    configurations::update(
        &state.db,
        id,
        request.user_id,
        request.interface_id,
        &request.channels,
        &request.inputs,
    )
    .await?;

    if let Some(frequency_id) = request.frequency_id {
        interfaces::set_frequency(&state.db, request.interface_id, Some(frequency_id)).await?;
    }

    Ok(Json(SaveConfigurationResponse {
        status: "saved".to_string(),
        configuration_id: id,
    }))
}

/// PUT /api/configurations/:id/channels/:channel_id/volume request body
#[derive(Debug, Deserialize)]
pub struct VolumeRequest {
    pub volume: f64,
}

/// PUT /api/configurations/:id/channels/:channel_id/volume
///
/// Targeted volume adjustment; responds with the full parameter row so the
/// widget can re-render without a second fetch.
pub async fn set_channel_volume(
    State(state): State<AppState>,
    Path((id, channel_id)): Path<(i64, i64)>,
    Json(request): Json<VolumeRequest>,
) -> Result<Json<ChannelParams>, ApiError> {
    configurations::set_channel_volume(&state.db, id, channel_id, request.volume).await?;

    let params = configurations::get_channel_params(&state.db, id, channel_id).await?;
    Ok(Json(params))
}
