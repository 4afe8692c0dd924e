use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct FollowResponse {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub follower_name: String,
    pub followed_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FollowResponse {
    pub fn from_follow(follow: Follow, follower_name: String, followed_name: String) -> Self {
        FollowResponse {
            id: follow.id,
            follower_id: follow.follower_id,
            followed_id: follow.followed_id,
            follower_name,
            followed_name,
            created_at: follow.created_at,
            updated_at: follow.updated_at,
        }
    }
}
