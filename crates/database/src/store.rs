//! The keyed record store the relay core runs against.

use async_trait::async_trait;

use crate::entities::{FieldUpdate, UserRecord};
use crate::types::StoreResult;

/// Keyed access to user records.
///
/// Implementations guarantee per-key atomic reads and writes. `create_if_absent`
/// is the only way to create a record and must be atomic with respect to
/// concurrent creations of the same key.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the record stored under `user_id`.
    async fn get(&self, user_id: &str) -> StoreResult<Option<UserRecord>>;

    /// Insert `record` unless its key is taken. Returns `true` when the record was written.
    async fn create_if_absent(&self, record: &UserRecord) -> StoreResult<bool>;

    /// Overwrite one field of an existing record. Returns `false` when no record matched.
    async fn update(&self, user_id: &str, update: FieldUpdate) -> StoreResult<bool>;
}
