//! User selector endpoint

use axum::{extract::State, Json};
use mixdesk_common::db::users;
use serde::Serialize;

use crate::api::ApiError;
use crate::AppState;

/// A user as shown in the selector; the credential hash never leaves the
/// repository layer.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = users::get_all(&state.db).await?;

    Ok(Json(
        users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                email: u.email,
            })
            .collect(),
    ))
}
