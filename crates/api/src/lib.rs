mod error;
mod extract;
mod state;

pub mod docs;
pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use extract::ApiJson;
pub use state::AppState;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // User routes
        .route("/api/users", post(routes::users::register_user))
        .route(
            "/api/users/device-address",
            put(routes::users::update_device_address),
        )
        // Auth routes
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/password", post(routes::auth::change_password))
        // Notification routes
        .route(
            "/api/notifications/routine",
            post(routes::notifications::send_routine_notification),
        )
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}
