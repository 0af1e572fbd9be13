use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::users::register_user,
        crate::routes::users::update_device_address,
        crate::routes::auth::login,
        crate::routes::auth::change_password,
        crate::routes::notifications::send_routine_notification
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::routes::health::HealthResponse,
            crate::routes::models::StatusResponse,
            crate::routes::users::RegisterUserRequest,
            crate::routes::users::UpdateDeviceAddressRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::ChangePasswordRequest,
            crate::routes::notifications::RoutineNotificationForm
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Users", description = "Registration and device addresses"),
        (name = "Auth", description = "Password checks and rotation"),
        (name = "Notifications", description = "Routine status notifications")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
