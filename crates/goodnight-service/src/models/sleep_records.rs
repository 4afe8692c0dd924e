use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SleepRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bed_time: DateTime<Utc>,
    pub wakeup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SleepRecord {
    /// An open record (no wakeup time yet) means the user is still asleep.
    pub fn sleeping(&self) -> bool {
        self.wakeup_time.is_none()
    }

    /// Fractional hours between bed time and wakeup time, `None` while open.
    pub fn duration_in_hours(&self) -> Option<f64> {
        self.wakeup_time
            .map(|wakeup| (wakeup - self.bed_time).num_milliseconds() as f64 / 3_600_000.0)
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SleepRecordResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bed_time: DateTime<Utc>,
    pub wakeup_time: Option<DateTime<Utc>>,
    pub duration_in_hours: Option<f64>,
    pub sleeping: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SleepRecord> for SleepRecordResponse {
    fn from(record: SleepRecord) -> Self {
        SleepRecordResponse {
            id: record.id,
            user_id: record.user_id,
            bed_time: record.bed_time,
            wakeup_time: record.wakeup_time,
            duration_in_hours: record.duration_in_hours(),
            sleeping: record.sleeping(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A sleep record joined with its owner's name, as served in the feed.
#[derive(Clone, Debug, FromRow, Serialize, Deserialize)]
pub struct SleepRecordWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub bed_time: DateTime<Utc>,
    pub wakeup_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SleepRecordWithUserResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub bed_time: DateTime<Utc>,
    pub wakeup_time: Option<DateTime<Utc>>,
    pub duration_in_hours: Option<f64>,
    pub sleeping: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SleepRecordWithUser> for SleepRecordWithUserResponse {
    fn from(record: SleepRecordWithUser) -> Self {
        let duration_in_hours = record
            .wakeup_time
            .map(|wakeup| (wakeup - record.bed_time).num_milliseconds() as f64 / 3_600_000.0);
        SleepRecordWithUserResponse {
            id: record.id,
            user_id: record.user_id,
            user_name: record.user_name,
            bed_time: record.bed_time,
            wakeup_time: record.wakeup_time,
            duration_in_hours,
            sleeping: record.wakeup_time.is_none(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
