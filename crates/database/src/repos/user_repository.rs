//! SQLite-backed user store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::entities::{FieldUpdate, UserRecord};
use crate::store::UserStore;
use crate::types::StoreResult;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn record_from_row(row: &SqliteRow) -> StoreResult<UserRecord> {
        Ok(UserRecord {
            user_id: row.try_get("user_id")?,
            password_hash: row.try_get("password_hash")?,
            nickname: row.try_get("nickname")?,
            device_address: row.try_get("device_address")?,
        })
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT user_id, password_hash, nickname, device_address FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn create_if_absent(&self, record: &UserRecord) -> StoreResult<bool> {
        let now = Utc::now().to_rfc3339();

        // The conflict clause makes the existence check and the write a single statement.
        let result = sqlx::query(
            r#"
            INSERT INTO users (user_id, password_hash, nickname, device_address, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO NOTHING
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.password_hash)
        .bind(&record.nickname)
        .bind(&record.device_address)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update(&self, user_id: &str, update: FieldUpdate) -> StoreResult<bool> {
        let now = Utc::now().to_rfc3339();

        // Column names come from a closed enum, never from input.
        let statement = format!(
            "UPDATE users SET {} = ?, updated_at = ? WHERE user_id = ?",
            update.column()
        );

        let result = sqlx::query(&statement)
            .bind(update.value())
            .bind(&now)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
