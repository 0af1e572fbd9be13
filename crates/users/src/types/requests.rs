//! Request types for relay operations.
//!
//! Fields are optional because callers may omit them; each operation validates
//! its request before touching the store.

use std::fmt;

/// Request for creating a new user
#[derive(Clone, Default)]
pub struct RegisterRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

impl RegisterRequest {
    pub fn new(
        user_id: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            password: Some(password.into()),
            nickname: Some(nickname.into()),
        }
    }
}

/// Request for checking a user's password
#[derive(Clone, Default)]
pub struct LoginRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            password: Some(password.into()),
        }
    }
}

/// Request for rotating a user's password
#[derive(Clone, Default)]
pub struct ChangePasswordRequest {
    pub user_id: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl ChangePasswordRequest {
    pub fn new(
        user_id: impl Into<String>,
        current_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            current_password: Some(current_password.into()),
            new_password: Some(new_password.into()),
        }
    }
}

/// Request for storing a user's push device address
#[derive(Clone, Default)]
pub struct DeviceAddressRequest {
    pub user_id: Option<String>,
    pub address: Option<String>,
}

impl DeviceAddressRequest {
    pub fn new(user_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            address: Some(address.into()),
        }
    }
}

/// Request for relaying a routine status from one user to another
#[derive(Debug, Clone, Default)]
pub struct RoutineNotificationRequest {
    pub from_user: Option<String>,
    pub to_user: Option<String>,
    pub routine_name: Option<String>,
    pub is_performed: Option<bool>,
}

impl RoutineNotificationRequest {
    pub fn new(
        from_user: impl Into<String>,
        to_user: impl Into<String>,
        routine_name: impl Into<String>,
        is_performed: bool,
    ) -> Self {
        Self {
            from_user: Some(from_user.into()),
            to_user: Some(to_user.into()),
            routine_name: Some(routine_name.into()),
            is_performed: Some(is_performed),
        }
    }
}

fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("user_id", &self.user_id)
            .field("password", &redacted(&self.password))
            .field("nickname", &self.nickname)
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user_id", &self.user_id)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("user_id", &self.user_id)
            .field("current_password", &redacted(&self.current_password))
            .field("new_password", &redacted(&self.new_password))
            .finish()
    }
}

impl fmt::Debug for DeviceAddressRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceAddressRequest")
            .field("user_id", &self.user_id)
            .field("address", &redacted(&self.address))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let register = format!("{:?}", RegisterRequest::new("alice", "pw1", "Alice"));
        assert!(register.contains("alice"));
        assert!(!register.contains("pw1"));

        let change = format!("{:?}", ChangePasswordRequest::new("alice", "old-pw", "new-pw"));
        assert!(!change.contains("old-pw"));
        assert!(!change.contains("new-pw"));

        let missing = format!("{:?}", LoginRequest::default());
        assert!(missing.contains("password: None"));
    }
}
