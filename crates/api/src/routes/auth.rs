use axum::{extract::State, Json};
use relay_users::{ChangePasswordRequest as CoreChangePasswordRequest, LoginRequest as CoreLoginRequest};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{extract::ApiJson, routes::models::StatusResponse, ApiError, AppState};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for CoreLoginRequest {
    fn from(value: LoginRequest) -> Self {
        Self {
            user_id: value.user_id,
            password: value.password,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl From<ChangePasswordRequest> for CoreChangePasswordRequest {
    fn from(value: ChangePasswordRequest) -> Self {
        Self {
            user_id: value.user_id,
            current_password: value.current_password,
            new_password: value.new_password,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = StatusResponse),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.credentials().authenticate(payload.into()).await?;

    Ok(Json(StatusResponse::new("success", "authenticated")))
}

#[utoipa::path(
    post,
    path = "/api/auth/password",
    tag = "Auth",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = StatusResponse),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Current password is wrong", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.credentials().change_password(payload.into()).await?;

    Ok(Json(StatusResponse::new("success", "password changed")))
}
