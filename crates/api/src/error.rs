use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_users::RelayError;
use serde::Serialize;
use tracing::{debug, warn};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        // The relay services log the failure with its user ids.
        debug!(category = error.category(), "mapping relay error to response");

        match error {
            RelayError::Validation(message) => Self::bad_request(message),
            RelayError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "invalid credentials"),
            RelayError::NotFound => Self::new(StatusCode::NOT_FOUND, "user not found"),
            RelayError::Conflict => Self::new(StatusCode::CONFLICT, "user already exists"),
            RelayError::NoAddress => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "receiver has no registered device address",
            ),
            RelayError::GatewayFailure(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "notification could not be delivered")
            }
            RelayError::Internal(_) => Self::internal_server_error("internal server error"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(category = "validation_error", error = %rejection, "malformed request body");
        Self::bad_request(format!("invalid request body: {}", rejection.body_text()))
    }
}
