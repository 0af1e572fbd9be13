use axum::{extract::State, Json};
use relay_users::RoutineNotificationRequest;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{extract::ApiJson, routes::models::StatusResponse, ApiError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutineNotificationForm {
    pub from_user: Option<String>,
    pub to_user: Option<String>,
    pub routine_name: Option<String>,
    pub is_performed: Option<bool>,
}

impl From<RoutineNotificationForm> for RoutineNotificationRequest {
    fn from(value: RoutineNotificationForm) -> Self {
        Self {
            from_user: value.from_user,
            to_user: value.to_user,
            routine_name: value.routine_name,
            is_performed: value.is_performed,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/notifications/routine",
    tag = "Notifications",
    request_body = RoutineNotificationForm,
    responses(
        (status = 200, description = "Notification handed to the push gateway", body = StatusResponse),
        (status = 400, description = "Missing or empty fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Receiver not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Receiver has no device address", body = crate::error::ErrorResponse),
        (status = 502, description = "Push gateway failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn send_routine_notification(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RoutineNotificationForm>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.notifications().dispatch(payload.into()).await?;

    Ok(Json(StatusResponse::new("sent", "notification sent")))
}
