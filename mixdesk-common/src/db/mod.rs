//! Database models and queries

pub mod channels;
pub mod configurations;
pub mod devices;
pub mod frequencies;
pub mod init;
pub mod inputs;
pub mod interfaces;
pub mod models;
pub mod sources;
pub mod types;
pub mod users;

pub use init::{connect_readonly, init_database};
pub use models::*;
