use crate::models::sleep_records::{SleepRecordResponse, SleepRecordWithUserResponse};
use crate::repositories::{
    follow_repository::FollowRepository, sleep_record_repository::SleepRecordRepository,
};
use crate::utils::errors::app_error::AppError;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Which side of the toggle a clock-in landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new record was opened (user went to bed).
    Created,
    /// The open record was closed (user woke up).
    Updated,
}

pub struct SleepRecordService {
    sleep_record_repository: Arc<SleepRecordRepository>,
    follow_repository: Arc<FollowRepository>,
}

impl SleepRecordService {
    pub fn new(
        sleep_record_repository: Arc<SleepRecordRepository>,
        follow_repository: Arc<FollowRepository>,
    ) -> Self {
        Self {
            sleep_record_repository,
            follow_repository,
        }
    }

    /// Flip the user's sleep state. Closes the latest record if it is still
    /// open, otherwise opens a new one at the current time.
    pub async fn toggle(
        &self,
        user_id: Uuid,
    ) -> Result<(SleepRecordResponse, ToggleOutcome), AppError> {
        let now = Utc::now();
        let latest = self
            .sleep_record_repository
            .find_latest_for_user(user_id)
            .await?;

        match latest {
            Some(record) if record.sleeping() => {
                let closed = self
                    .sleep_record_repository
                    .set_wakeup_time(record.id, now)
                    .await?;
                Ok((SleepRecordResponse::from(closed), ToggleOutcome::Updated))
            }
            _ => {
                let opened = self
                    .sleep_record_repository
                    .insert_record(user_id, now)
                    .await?;
                Ok((SleepRecordResponse::from(opened), ToggleOutcome::Created))
            }
        }
    }

    /// One page of the followees' sleep history, newest bed time first.
    /// Returns `None` when the user follows nobody.
    pub async fn followed_sleep_records(
        &self,
        user_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<Option<(Vec<SleepRecordWithUserResponse>, i64)>, AppError> {
        let followed_ids = self.follow_repository.list_followed_ids(user_id).await?;
        if followed_ids.is_empty() {
            return Ok(None);
        }

        let offset = (page as i64 - 1) * limit as i64;
        let total_count = self
            .sleep_record_repository
            .count_for_users(&followed_ids)
            .await?;
        let records = self
            .sleep_record_repository
            .list_for_users(&followed_ids, limit as i64, offset)
            .await?;

        Ok(Some((
            records
                .into_iter()
                .map(SleepRecordWithUserResponse::from)
                .collect(),
            total_count,
        )))
    }
}
