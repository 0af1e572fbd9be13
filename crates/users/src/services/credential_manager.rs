//! Registration, login, and password rotation.

use std::sync::Arc;

use relay_database::{FieldUpdate, UserRecord, UserStore};
use tracing::{debug, info};

use super::log_failure;
use crate::types::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, RelayError, RelayResult,
};
use crate::utils::{require_secret, require_text, CredentialHasher};

/// Drives the credential lifecycle of a user against a [`UserStore`].
#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher) -> Self {
        Self { store, hasher }
    }

    /// Create a user with a freshly salted password hash and no device address.
    pub async fn register(&self, request: RegisterRequest) -> RelayResult<()> {
        let user_id = request.user_id.clone();
        self.try_register(request)
            .await
            .inspect_err(|e| log_failure("register", user_id.as_deref(), None, e))
    }

    /// Check a password against the stored hash. Never writes.
    pub async fn authenticate(&self, request: LoginRequest) -> RelayResult<()> {
        let user_id = request.user_id.clone();
        self.try_authenticate(request)
            .await
            .inspect_err(|e| log_failure("authenticate", user_id.as_deref(), None, e))
    }

    /// Replace the stored hash after proving knowledge of the current password.
    pub async fn change_password(&self, request: ChangePasswordRequest) -> RelayResult<()> {
        let user_id = request.user_id.clone();
        self.try_change_password(request)
            .await
            .inspect_err(|e| log_failure("change_password", user_id.as_deref(), None, e))
    }

    async fn try_register(&self, request: RegisterRequest) -> RelayResult<()> {
        let user_id = require_text("userId", request.user_id)?;
        let password = require_secret("password", request.password)?;
        let nickname = require_text("nickname", request.nickname)?;

        if self.store.get(&user_id).await?.is_some() {
            return Err(RelayError::Conflict);
        }

        let password_hash = self.hasher.hash(password).await?;
        let record = UserRecord::new(user_id.clone(), password_hash, nickname);

        // A concurrent registration may have won since the lookup above.
        if !self.store.create_if_absent(&record).await? {
            debug!(user_id = %user_id, "registration lost a concurrent create");
            return Err(RelayError::Conflict);
        }

        info!(user_id = %user_id, "user registered");
        Ok(())
    }

    async fn try_authenticate(&self, request: LoginRequest) -> RelayResult<()> {
        let user_id = require_text("userId", request.user_id)?;
        let password = require_secret("password", request.password)?;

        let record = self.load(&user_id).await?;
        self.check_password(&record, password).await?;

        info!(user_id = %user_id, "user authenticated");
        Ok(())
    }

    async fn try_change_password(&self, request: ChangePasswordRequest) -> RelayResult<()> {
        let user_id = require_text("userId", request.user_id)?;
        let current_password = require_secret("currentPassword", request.current_password)?;
        let new_password = require_secret("newPassword", request.new_password)?;

        let record = self.load(&user_id).await?;
        self.check_password(&record, current_password).await?;

        let password_hash = self.hasher.hash(new_password).await?;
        if !self
            .store
            .update(&user_id, FieldUpdate::PasswordHash(password_hash))
            .await?
        {
            return Err(RelayError::NotFound);
        }

        info!(user_id = %user_id, "password changed");
        Ok(())
    }

    async fn load(&self, user_id: &str) -> RelayResult<UserRecord> {
        self.store.get(user_id).await?.ok_or(RelayError::NotFound)
    }

    async fn check_password(&self, record: &UserRecord, password: String) -> RelayResult<()> {
        if self
            .hasher
            .verify(password, record.password_hash.clone())
            .await?
        {
            Ok(())
        } else {
            Err(RelayError::Unauthorized)
        }
    }
}
