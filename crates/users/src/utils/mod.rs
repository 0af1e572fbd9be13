//! Internal utilities shared by the relay services.

pub mod password;
pub mod validation;

pub use password::CredentialHasher;
pub use validation::{require_flag, require_secret, require_text};
