//! Error taxonomy for relay operations.

use relay_database::StoreError;
use thiserror::Error;

use crate::push::PushError;

/// Every failure a relay operation can report.
///
/// Variants map one-to-one onto the categories callers see; transports translate
/// them without inspecting the attached detail.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("user already exists")]
    Conflict,

    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    Unauthorized,

    #[error("receiver has no registered device address")]
    NoAddress,

    #[error("push delivery failed: {0}")]
    GatewayFailure(#[source] PushError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable snake_case name of the category, for logs and response bodies.
    pub fn category(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation_error",
            RelayError::Conflict => "conflict",
            RelayError::NotFound => "not_found",
            RelayError::Unauthorized => "unauthorized",
            RelayError::NoAddress => "no_address",
            RelayError::GatewayFailure(_) => "gateway_failure",
            RelayError::Internal(_) => "internal_error",
        }
    }

    /// Faults on the relay's side rather than in the caller's request.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, RelayError::GatewayFailure(_) | RelayError::Internal(_))
    }
}

impl From<StoreError> for RelayError {
    fn from(err: StoreError) -> Self {
        RelayError::Internal(err.to_string())
    }
}

impl From<PushError> for RelayError {
    fn from(err: PushError) -> Self {
        RelayError::GatewayFailure(err)
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
