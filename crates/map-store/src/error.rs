//! Store error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during map store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is not made of `[A-Za-z0-9-]`.
    #[error("Invalid map ID: {0}")]
    InvalidId(String),

    /// No map with this id.
    #[error("Map not found: {0}")]
    NotFound(String),

    /// The submitted configuration is not acceptable.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
