//! Seed the database with fake users, follow edges, and sleep history.
//!
//! Usage: `cargo run --bin seed`. Destructive: clears existing rows first.

use chrono::{Duration, Utc};
use dotenv::dotenv;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use goodnight_service::settings;
use goodnight_service::utils::password::hash_password;
use sqlx::postgres::PgPool;
use uuid::Uuid;

const USERS_COUNT: usize = 50;
const FOLLOWS_PER_USER: usize = 5;
const SLEEP_RECORDS_PER_USER: usize = 7;

/// Every seeded user gets the same password so seeded accounts are usable
/// against the Basic-auth endpoints.
const SEED_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let settings = settings::load_settings().expect("Failed to load settings");
    let pool = PgPool::connect(&settings.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    println!("Clearing existing data...");
    sqlx::query("DELETE FROM follows").execute(&pool).await?;
    sqlx::query("DELETE FROM sleep_records").execute(&pool).await?;
    sqlx::query("DELETE FROM users").execute(&pool).await?;

    println!("Seeding {} users...", USERS_COUNT);
    let password_hash = hash_password(SEED_PASSWORD)?;
    let mut user_ids = Vec::with_capacity(USERS_COUNT);
    for i in 0..USERS_COUNT {
        let name: String = Name().fake();
        let email = format!("{}.{}", i, SafeEmail().fake::<String>());
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&name)
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(&pool)
        .await?;
        user_ids.push(id);
    }

    println!("Seeding follow relationships...");
    let mut follows = 0;
    for (i, follower_id) in user_ids.iter().enumerate() {
        for step in 1..=FOLLOWS_PER_USER {
            let followed_id = user_ids[(i + step) % user_ids.len()];
            if followed_id == *follower_id {
                continue;
            }
            sqlx::query(
                "INSERT INTO follows (follower_id, followed_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(follower_id)
            .bind(followed_id)
            .execute(&pool)
            .await?;
            follows += 1;
        }
    }

    println!("Seeding {} sleep records per user...", SLEEP_RECORDS_PER_USER);
    let now = Utc::now();
    for user_id in &user_ids {
        for night in 0..SLEEP_RECORDS_PER_USER {
            let bed_time = now - Duration::days(night as i64 + 1)
                + Duration::minutes((-90..90).fake::<i64>());
            // Most recent night stays open for roughly a third of users.
            let wakeup_time = if night == 0 && (0..3).fake::<u8>() == 0 {
                None
            } else {
                Some(bed_time + Duration::minutes((300..560).fake::<i64>()))
            };
            sqlx::query(
                "INSERT INTO sleep_records (user_id, bed_time, wakeup_time, created_at)
                 VALUES ($1, $2, $3, $2)",
            )
            .bind(user_id)
            .bind(bed_time)
            .bind(wakeup_time)
            .execute(&pool)
            .await?;
        }
    }

    println!(
        "Done: {} users, {} follows, {} sleep records.",
        user_ids.len(),
        follows,
        user_ids.len() * SLEEP_RECORDS_PER_USER
    );
    println!("All seeded users authenticate with password '{}'", SEED_PASSWORD);

    Ok(())
}
