use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::{
    apis::api_models::response::{AuthTestResponse, AuthenticatedUser, HealthResponse},
    apis::middlewares::auth::CurrentUser,
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
};

const TAG: &str = "health";

/// Liveness probe, no authentication required
#[utoipa::path(
    get,
    tag = TAG,
    path = "/up",
    operation_id = "healthCheck",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub(super) async fn show() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Echo the authenticated user
#[utoipa::path(
    get,
    tag = TAG,
    path = "/test_auth",
    operation_id = "testAuth",
    responses(
        (status = 200, description = "Credentials accepted", body = AuthTestResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorPayload)
    ),
    security(("basic_auth" = []))
)]
pub(super) async fn test_auth(
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(AuthTestResponse {
            message: "Authentication successful!".to_string(),
            user: AuthenticatedUser {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        }),
    ))
}
