use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    apis::api_models::{request::RegisterUserRequest, response::RegisteredUserResponse},
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "users";

/// Register a new user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "registerUser",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisteredUserResponse),
        (status = 422, description = "Validation failed", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    )
)]
pub(super) async fn register_user(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_service
        .register(&body.name, &body.email, &body.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}
