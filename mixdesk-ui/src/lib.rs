//! mixdesk-ui library - web admin console
//!
//! Serves the forms UI and the JSON API over one shared SQLite pool.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/users", get(api::list_users))
        .route("/api/users/:id/configuration", get(api::user_configuration))
        .route("/api/frequencies", get(api::list_frequencies))
        .route("/api/devices", get(api::list_devices))
        .route("/api/configurations/:id", put(api::save_configuration))
        .route(
            "/api/configurations/:id/channels/:channel_id/volume",
            put(api::set_channel_volume),
        )
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
