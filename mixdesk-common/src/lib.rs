//! # MixDesk Common Library
//!
//! Shared code for the MixDesk admin console and CLI including:
//! - Entity models and repository functions
//! - Database initialization
//! - Error types
//! - Database path resolution

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
