use crate::models::sleep_records::{SleepRecord, SleepRecordWithUser};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct SleepRecordRepository {
    db: Arc<PgPool>,
}

impl SleepRecordRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        SleepRecordRepository { db }
    }

    /// The user's most recently created record, open or closed.
    pub async fn find_latest_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SleepRecord>, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            "SELECT * FROM sleep_records
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.db.as_ref())
        .await
    }

    pub async fn insert_record(
        &self,
        user_id: Uuid,
        bed_time: DateTime<Utc>,
    ) -> Result<SleepRecord, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            "INSERT INTO sleep_records (user_id, bed_time)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(user_id)
        .bind(bed_time)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn set_wakeup_time(
        &self,
        record_id: Uuid,
        wakeup_time: DateTime<Utc>,
    ) -> Result<SleepRecord, sqlx::Error> {
        sqlx::query_as::<_, SleepRecord>(
            "UPDATE sleep_records
             SET wakeup_time = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(record_id)
        .bind(wakeup_time)
        .fetch_one(self.db.as_ref())
        .await
    }

    /// One feed page: records owned by any of `user_ids`, newest bed time
    /// first, joined with the owner's name.
    pub async fn list_for_users(
        &self,
        user_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SleepRecordWithUser>, sqlx::Error> {
        sqlx::query_as::<_, SleepRecordWithUser>(
            "SELECT
                sr.id,
                sr.user_id,
                u.name AS user_name,
                sr.bed_time,
                sr.wakeup_time,
                sr.created_at,
                sr.updated_at
             FROM sleep_records sr
             INNER JOIN users u ON u.id = sr.user_id
             WHERE sr.user_id = ANY($1)
             ORDER BY sr.bed_time DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.as_ref())
        .await
    }

    pub async fn count_for_users(&self, user_ids: &[Uuid]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sleep_records WHERE user_id = ANY($1)",
        )
        .bind(user_ids)
        .fetch_one(self.db.as_ref())
        .await
    }
}
