//! Common error types for MixDesk

use thiserror::Error;

/// Common result type for MixDesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the MixDesk binaries
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique/foreign-key/check constraint rejected the operation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        // Surface schema-level rejections as their own variant so callers
        // can tell a bad write apart from a broken store.
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Error::ConstraintViolation(db.message().to_string());
                }
                _ => {}
            }
        }
        Error::Database(e)
    }
}
