//! HTTP API handlers for mixdesk-ui

pub mod catalog;
pub mod console;
pub mod error;
pub mod health;
pub mod ui;
pub mod users;

pub use catalog::{list_devices, list_frequencies};
pub use console::{save_configuration, set_channel_volume, user_configuration};
pub use error::ApiError;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
pub use users::list_users;
