//! User entity definitions

use std::fmt;

/// The persisted user record.
///
/// `password_hash` holds a PHC string and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub password_hash: String,
    pub nickname: String,
    pub device_address: Option<String>,
}

impl UserRecord {
    /// A freshly registered user has no device address yet.
    pub fn new(
        user_id: impl Into<String>,
        password_hash: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            password_hash: password_hash.into(),
            nickname: nickname.into(),
            device_address: None,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("password_hash", &"<redacted>")
            .field("nickname", &self.nickname)
            .field("device_address", &self.device_address.as_ref().map(|_| "<set>"))
            .finish()
    }
}

/// A single-field write against an existing record.
#[derive(Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    PasswordHash(String),
    DeviceAddress(String),
}

impl FieldUpdate {
    pub fn column(&self) -> &'static str {
        match self {
            FieldUpdate::PasswordHash(_) => "password_hash",
            FieldUpdate::DeviceAddress(_) => "device_address",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FieldUpdate::PasswordHash(value) | FieldUpdate::DeviceAddress(value) => value,
        }
    }

    pub(crate) fn apply(self, record: &mut UserRecord) {
        match self {
            FieldUpdate::PasswordHash(hash) => record.password_hash = hash,
            FieldUpdate::DeviceAddress(address) => record.device_address = Some(address),
        }
    }
}

impl fmt::Debug for FieldUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldUpdate({})", self.column())
    }
}
