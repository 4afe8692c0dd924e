use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    apis::api_models::response::SleepToggleResponse,
    apis::middlewares::auth::CurrentUser,
    services::sleep_record_service::ToggleOutcome,
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "sleep_records";

/// Clock in or out
///
/// Flips the caller's sleep state: opens a new record at the current time, or
/// closes the still-open one by stamping its wakeup time.
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "toggleSleepRecord",
    responses(
        (status = 201, description = "Sleep record created", body = SleepToggleResponse),
        (status = 200, description = "Wakeup time recorded", body = SleepToggleResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    security(("basic_auth" = []))
)]
pub(super) async fn toggle_sleep(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let (record, outcome) = app_state.sleep_record_service.toggle(user.id).await?;

    let (status, message) = match outcome {
        ToggleOutcome::Created => (StatusCode::CREATED, "Sleep record created successfully"),
        ToggleOutcome::Updated => (StatusCode::OK, "Wakeup time updated successfully"),
    };

    Ok((
        status,
        Json(SleepToggleResponse {
            message: message.to_string(),
            sleep_record: record,
        }),
    ))
}
