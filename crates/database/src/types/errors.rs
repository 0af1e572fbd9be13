//! Error types for the database layer

use thiserror::Error;

/// Errors raised while bringing the database up
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Faults reported by a user store.
///
/// Absence is not an error: lookups return `Ok(None)` and writes report
/// whether they touched a record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
