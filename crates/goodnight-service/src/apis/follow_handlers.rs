use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    apis::api_models::{
        query::{total_pages, FeedQuery},
        request::FollowUserRequest,
        response::{FeedResponse, FollowActionResponse, Pagination},
    },
    apis::middlewares::auth::CurrentUser,
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    AppState,
};

const TAG: &str = "follows";

/// Follow a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "followUser",
    request_body = FollowUserRequest,
    responses(
        (status = 201, description = "User followed successfully", body = FollowActionResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload),
        (status = 422, description = "Self-follow or duplicate follow", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    security(("basic_auth" = []))
)]
pub(super) async fn follow_user(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<FollowUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let follow = app_state
        .follow_service
        .follow_user(&user, body.followed_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FollowActionResponse {
            message: "Successfully followed user".to_string(),
            follow,
        }),
    ))
}

/// Unfollow a user
#[utoipa::path(
    delete,
    tag = TAG,
    path = "/{followed_id}",
    operation_id = "unfollowUser",
    params(
        ("followed_id" = Uuid, Path, description = "User ID to unfollow")
    ),
    responses(
        (status = 200, description = "User unfollowed successfully", body = FollowActionResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorPayload),
        (status = 404, description = "User or follow relationship not found", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    security(("basic_auth" = []))
)]
pub(super) async fn unfollow_user(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(followed_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let follow = app_state
        .follow_service
        .unfollow_user(&user, followed_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(FollowActionResponse {
            message: "Successfully unfollowed user".to_string(),
            follow,
        }),
    ))
}

/// Followed users' sleep records
///
/// Pages through the sleep records of everyone the caller follows, most
/// recent bed time first.
#[utoipa::path(
    get,
    tag = TAG,
    path = "/sleep_records",
    operation_id = "followedSleepRecords",
    params(FeedQuery),
    responses(
        (status = 200, description = "Paginated sleep records", body = FeedResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorPayload),
        (status = 500, description = "Internal server error", body = ErrorPayload)
    ),
    security(("basic_auth" = []))
)]
pub(super) async fn followed_sleep_records(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page();
    let limit = query.limit();

    let feed = app_state
        .sleep_record_service
        .followed_sleep_records(user.id, page, limit)
        .await?;

    let response = match feed {
        None => FeedResponse {
            message: "No sleep records found".to_string(),
            sleep_records: vec![],
            pagination: Pagination {
                current_page: page,
                per_page: limit,
                total_pages: 0,
                total_count: 0,
            },
        },
        Some((sleep_records, total_count)) => FeedResponse {
            message: "Sleep records retrieved successfully".to_string(),
            sleep_records,
            pagination: Pagination {
                current_page: page,
                per_page: limit,
                total_pages: total_pages(total_count, limit),
                total_count,
            },
        },
    };

    Ok((StatusCode::OK, Json(response)))
}
