//! Shared types for the relay services.

pub mod errors;
pub mod requests;

pub use errors::{RelayError, RelayResult};
pub use requests::{
    ChangePasswordRequest, DeviceAddressRequest, LoginRequest, RegisterRequest,
    RoutineNotificationRequest,
};
