use axum::{extract::State, http::StatusCode, Json};
use relay_users::{DeviceAddressRequest, RegisterRequest};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{extract::ApiJson, routes::models::StatusResponse, ApiError, AppState};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub nickname: Option<String>,
}

impl From<RegisterUserRequest> for RegisterRequest {
    fn from(value: RegisterUserRequest) -> Self {
        Self {
            user_id: value.user_id,
            password: value.password,
            nickname: value.nickname,
        }
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceAddressRequest {
    pub user_id: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateDeviceAddressRequest> for DeviceAddressRequest {
    fn from(value: UpdateDeviceAddressRequest) -> Self {
        Self {
            user_id: value.user_id,
            address: value.address,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = StatusResponse),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 409, description = "User already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    state.credentials().register(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::new("created", "user registered")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/users/device-address",
    tag = "Users",
    request_body = UpdateDeviceAddressRequest,
    responses(
        (status = 200, description = "Device address stored", body = StatusResponse),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_device_address(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateDeviceAddressRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.devices().set_address(payload.into()).await?;

    Ok(Json(StatusResponse::new("updated", "device address updated")))
}
