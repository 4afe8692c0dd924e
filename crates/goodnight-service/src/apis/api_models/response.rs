use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    follows::FollowResponse,
    sleep_records::{SleepRecordResponse, SleepRecordWithUserResponse},
    users::UserResponse,
};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthTestResponse {
    pub message: String,
    pub user: AuthenticatedUser,
}

#[derive(Serialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUserResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Serialize, ToSchema)]
pub struct SleepToggleResponse {
    pub message: String,
    pub sleep_record: SleepRecordResponse,
}

#[derive(Serialize, ToSchema)]
pub struct FollowActionResponse {
    pub message: String,
    pub follow: FollowResponse,
}

/// Pagination metadata, shaped like the original API payload.
#[derive(Serialize, ToSchema, Debug, PartialEq)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct FeedResponse {
    pub message: String,
    pub sleep_records: Vec<SleepRecordWithUserResponse>,
    pub pagination: Pagination,
}
