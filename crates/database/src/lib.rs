//! Relay Database Crate
//!
//! Persistence for user records: the [`UserStore`] port the relay core depends
//! on, a SQLite implementation with embedded migrations, and an in-memory
//! implementation for tests and throwaway deployments.

use relay_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod store;
pub mod types;

pub use connection::prepare_database;
pub use entities::{FieldUpdate, UserRecord};
pub use migrations::run_migrations;
pub use repos::{MemoryUserRepository, UserRepository};
pub use store::UserStore;
pub use types::{DatabaseError, DatabaseResult, StoreError, StoreResult};

pub use sqlx::SqlitePool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
