use crate::models::follows::Follow;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct FollowRepository {
    db: Arc<PgPool>,
}

impl FollowRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        FollowRepository { db }
    }

    pub async fn insert_follow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Follow, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            "INSERT INTO follows (follower_id, followed_id)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_follow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Follow>, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            "SELECT * FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(self.db.as_ref())
        .await
    }

    pub async fn delete_follow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Follow>, sqlx::Error> {
        sqlx::query_as::<_, Follow>(
            "DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2
             RETURNING *",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(self.db.as_ref())
        .await
    }

    pub async fn is_following(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(self.db.as_ref())
        .await
    }

    /// Ids of every user `follower_id` follows.
    pub async fn list_followed_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT followed_id FROM follows WHERE follower_id = $1")
            .bind(follower_id)
            .fetch_all(self.db.as_ref())
            .await
    }
}
