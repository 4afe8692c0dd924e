//! Database-backed tests for the toggle state machine, follow validation
//! ordering, and the followed-sleep-records feed.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use goodnight_service::models::users::User;
use goodnight_service::services::sleep_record_service::ToggleOutcome;
use goodnight_service::setup_services;
use goodnight_service::utils::errors::app_error::AppError;
use sqlx::PgPool;
use uuid::Uuid;

async fn create_user(pool: &PgPool, name: &str) -> User {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash)
         VALUES ($1, $2, 'unused-hash')
         RETURNING *",
    )
    .bind(name)
    .bind(format!("{}@example.com", name.to_lowercase()))
    .fetch_one(pool)
    .await
    .expect("user insert should succeed")
}

async fn insert_sleep_record(
    pool: &PgPool,
    user_id: Uuid,
    bed_time: DateTime<Utc>,
    wakeup_time: Option<DateTime<Utc>>,
) {
    sqlx::query(
        "INSERT INTO sleep_records (user_id, bed_time, wakeup_time, created_at)
         VALUES ($1, $2, $3, $2)",
    )
    .bind(user_id)
    .bind(bed_time)
    .bind(wakeup_time)
    .execute(pool)
    .await
    .expect("sleep record insert should succeed");
}

async fn open_record_count(pool: &PgPool, user_id: Uuid) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM sleep_records WHERE user_id = $1 AND wakeup_time IS NULL",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Sleep session toggle
// ---------------------------------------------------------------------------

/// Toggling twice from awake runs asleep -> awake, with the wakeup time
/// stamped after the bed time.
#[sqlx::test]
async fn toggle_twice_opens_then_closes(pool: PgPool) {
    let user = create_user(&pool, "Sleeper").await;
    let (_, _, sleep_record_service) = setup_services(Arc::new(pool.clone()));

    let (opened, outcome) = sleep_record_service.toggle(user.id).await.unwrap();
    assert_eq!(outcome, ToggleOutcome::Created);
    assert!(opened.sleeping);
    assert!(opened.wakeup_time.is_none());
    assert!(opened.duration_in_hours.is_none());

    let (closed, outcome) = sleep_record_service.toggle(user.id).await.unwrap();
    assert_eq!(outcome, ToggleOutcome::Updated);
    assert_eq!(closed.id, opened.id);
    assert!(!closed.sleeping);
    assert!(closed.wakeup_time.unwrap() > closed.bed_time);
    assert!(closed.duration_in_hours.unwrap() >= 0.0);
}

/// However often the toggle runs, a user never accumulates more than one
/// open record.
#[sqlx::test]
async fn repeated_toggles_keep_at_most_one_open_record(pool: PgPool) {
    let user = create_user(&pool, "Restless").await;
    let (_, _, sleep_record_service) = setup_services(Arc::new(pool.clone()));

    for _ in 0..5 {
        sleep_record_service.toggle(user.id).await.unwrap();
        assert!(open_record_count(&pool, user.id).await <= 1);
    }
}

/// A toggle after a completed night opens a fresh record instead of touching
/// the closed one.
#[sqlx::test]
async fn toggle_after_completed_record_creates_a_new_one(pool: PgPool) {
    let user = create_user(&pool, "Regular").await;
    let bed = Utc.with_ymd_and_hms(2023, 3, 1, 22, 0, 0).unwrap();
    insert_sleep_record(&pool, user.id, bed, Some(bed + chrono::Duration::hours(8))).await;

    let (_, _, sleep_record_service) = setup_services(Arc::new(pool.clone()));
    let (record, outcome) = sleep_record_service.toggle(user.id).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Created);
    assert!(record.sleeping);
    assert_eq!(open_record_count(&pool, user.id).await, 1);
}

// ---------------------------------------------------------------------------
// Follow validation
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn duplicate_follow_is_rejected_without_a_second_row(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let (_, follow_service, _) = setup_services(Arc::new(pool.clone()));

    let follow = follow_service.follow_user(&alice, bob.id).await.unwrap();
    assert_eq!(follow.follower_name, "Alice");
    assert_eq!(follow.followed_name, "Bob");

    let second = follow_service.follow_user(&alice, bob.id).await;
    assert!(matches!(second, Err(AppError::AlreadyFollowing)));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test]
async fn self_follow_is_rejected(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let (_, follow_service, _) = setup_services(Arc::new(pool.clone()));

    let result = follow_service.follow_user(&alice, alice.id).await;
    assert!(matches!(result, Err(AppError::SelfFollow)));
}

#[sqlx::test]
async fn following_a_missing_user_is_not_found(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let (_, follow_service, _) = setup_services(Arc::new(pool.clone()));

    let result = follow_service.follow_user(&alice, Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::FollowedUserNotFound)));
}

#[sqlx::test]
async fn unfollowing_without_an_edge_is_not_found(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let (_, follow_service, _) = setup_services(Arc::new(pool.clone()));

    let result = follow_service.unfollow_user(&alice, bob.id).await;
    assert!(matches!(result, Err(AppError::FollowNotFound)));
}

#[sqlx::test]
async fn unfollow_deletes_the_edge(pool: PgPool) {
    let alice = create_user(&pool, "Alice").await;
    let bob = create_user(&pool, "Bob").await;
    let (_, follow_service, _) = setup_services(Arc::new(pool.clone()));

    follow_service.follow_user(&alice, bob.id).await.unwrap();
    follow_service.unfollow_user(&alice, bob.id).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// The worked example: A follows B and C; B slept 22:00-06:00, C is still
/// asleep since midnight. Page 1 (limit 1) is C's open record, page 2 is B's
/// with an 8 hour duration, and the two pages cover the set exactly once.
#[sqlx::test]
async fn feed_pages_through_followed_records_newest_bed_time_first(pool: PgPool) {
    let a = create_user(&pool, "A").await;
    let b = create_user(&pool, "B").await;
    let c = create_user(&pool, "C").await;
    let (_, follow_service, sleep_record_service) = setup_services(Arc::new(pool.clone()));

    follow_service.follow_user(&a, b.id).await.unwrap();
    follow_service.follow_user(&a, c.id).await.unwrap();

    let b_bed = Utc.with_ymd_and_hms(2023, 1, 1, 22, 0, 0).unwrap();
    let b_wake = Utc.with_ymd_and_hms(2023, 1, 2, 6, 0, 0).unwrap();
    insert_sleep_record(&pool, b.id, b_bed, Some(b_wake)).await;

    let c_bed = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    insert_sleep_record(&pool, c.id, c_bed, None).await;

    let (page1, total) = sleep_record_service
        .followed_sleep_records(a.id, 1, 1)
        .await
        .unwrap()
        .expect("A follows two users");
    assert_eq!(total, 2);
    assert_eq!(page1.len(), 1);
    assert_eq!(page1[0].user_id, c.id);
    assert_eq!(page1[0].user_name, "C");
    assert!(page1[0].sleeping);
    assert_eq!(page1[0].duration_in_hours, None);

    let (page2, _) = sleep_record_service
        .followed_sleep_records(a.id, 2, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page2.len(), 1);
    assert_eq!(page2[0].user_id, b.id);
    assert_eq!(page2[0].duration_in_hours, Some(8.0));

    // Concatenated pages reproduce the descending set exactly once.
    let ids: Vec<Uuid> = page1.iter().chain(page2.iter()).map(|r| r.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    let (page3, _) = sleep_record_service
        .followed_sleep_records(a.id, 3, 1)
        .await
        .unwrap()
        .unwrap();
    assert!(page3.is_empty());
}

/// The feed only shows followees' records, never the caller's own or those
/// of strangers.
#[sqlx::test]
async fn feed_excludes_non_followed_users(pool: PgPool) {
    let a = create_user(&pool, "A").await;
    let b = create_user(&pool, "B").await;
    let stranger = create_user(&pool, "Stranger").await;
    let (_, follow_service, sleep_record_service) = setup_services(Arc::new(pool.clone()));

    follow_service.follow_user(&a, b.id).await.unwrap();

    let bed = Utc.with_ymd_and_hms(2023, 5, 1, 23, 0, 0).unwrap();
    insert_sleep_record(&pool, a.id, bed, None).await;
    insert_sleep_record(&pool, b.id, bed, None).await;
    insert_sleep_record(&pool, stranger.id, bed, None).await;

    let (records, total) = sleep_record_service
        .followed_sleep_records(a.id, 1, 25)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(records[0].user_id, b.id);
}

/// Following nobody yields the distinct empty-feed shape.
#[sqlx::test]
async fn feed_is_none_when_following_nobody(pool: PgPool) {
    let a = create_user(&pool, "A").await;
    let (_, _, sleep_record_service) = setup_services(Arc::new(pool.clone()));

    let feed = sleep_record_service
        .followed_sleep_records(a.id, 1, 25)
        .await
        .unwrap();
    assert!(feed.is_none());
}
