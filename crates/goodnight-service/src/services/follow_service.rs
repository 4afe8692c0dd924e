use crate::models::follows::FollowResponse;
use crate::models::users::User;
use crate::repositories::{
    follow_repository::FollowRepository, user_repository::UserRepository,
};
use crate::services::user_service::is_unique_violation;
use crate::utils::errors::app_error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub struct FollowService {
    follow_repository: Arc<FollowRepository>,
    user_repository: Arc<UserRepository>,
}

impl FollowService {
    pub fn new(
        follow_repository: Arc<FollowRepository>,
        user_repository: Arc<UserRepository>,
    ) -> Self {
        Self {
            follow_repository,
            user_repository,
        }
    }

    pub async fn follow_user(
        &self,
        follower: &User,
        followed_id: Uuid,
    ) -> Result<FollowResponse, AppError> {
        let followed = self
            .user_repository
            .find_by_id(followed_id)
            .await?
            .ok_or(AppError::FollowedUserNotFound)?;

        if follower.id == followed.id {
            return Err(AppError::SelfFollow);
        }
        if self
            .follow_repository
            .is_following(follower.id, followed.id)
            .await?
        {
            return Err(AppError::AlreadyFollowing);
        }

        // The composite unique index is the authority under concurrent
        // requests; map its violation the same way as the pre-check.
        let follow = self
            .follow_repository
            .insert_follow(follower.id, followed.id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::AlreadyFollowing
                } else {
                    AppError::DatabaseError(e)
                }
            })?;

        Ok(FollowResponse::from_follow(
            follow,
            follower.name.clone(),
            followed.name,
        ))
    }

    pub async fn unfollow_user(
        &self,
        follower: &User,
        followed_id: Uuid,
    ) -> Result<FollowResponse, AppError> {
        let followed = self
            .user_repository
            .find_by_id(followed_id)
            .await?
            .ok_or(AppError::UnfollowedUserNotFound)?;

        let follow = self
            .follow_repository
            .delete_follow(follower.id, followed.id)
            .await?
            .ok_or(AppError::FollowNotFound)?;

        Ok(FollowResponse::from_follow(
            follow,
            follower.name.clone(),
            followed.name,
        ))
    }
}
