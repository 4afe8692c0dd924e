use apis::middlewares::throttle::{self, RateLimiter};
use apis::setup_routes;
use axum::{middleware, Router};
use repositories::{
    follow_repository::FollowRepository, sleep_record_repository::SleepRecordRepository,
    user_repository::UserRepository,
};
use services::{
    follow_service::FollowService, sleep_record_service::SleepRecordService,
    user_service::UserService,
};
use sqlx::postgres::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod apis;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;

pub struct AppState {
    pub user_service: UserService,
    pub follow_service: Arc<FollowService>,
    pub sleep_record_service: Arc<SleepRecordService>,
    pub rate_limiter: RateLimiter,
}

pub async fn setup_database(database_url: &str) -> Result<Arc<PgPool>, sqlx::Error> {
    let pool = PgPool::connect(database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    Ok(Arc::new(pool))
}

pub async fn setup_router(
    settings: &settings::Settings,
) -> Result<Router, Box<dyn std::error::Error>> {
    let db = setup_database(&settings.database_url).await?;
    Ok(build_router(db, settings))
}

/// Assemble the full router over an existing pool. Split out of
/// [`setup_router`] so tests can drive it without a live database.
pub fn build_router(db: Arc<PgPool>, settings: &settings::Settings) -> Router {
    let (user_service, follow_service, sleep_record_service) = setup_services(db);

    let rate_limiter = RateLimiter::new(
        settings.rate_limit_number.unwrap_or(throttle::DEFAULT_LIMIT),
        settings
            .rate_limit_period
            .unwrap_or(throttle::DEFAULT_PERIOD_SECS),
    );

    let state = Arc::new(AppState {
        user_service,
        follow_service,
        sleep_record_service,
        rate_limiter,
    });

    setup_routes()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            throttle::throttle_by_ip,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn setup_services(
    db: Arc<PgPool>,
) -> (UserService, Arc<FollowService>, Arc<SleepRecordService>) {
    let user_repository = Arc::new(UserRepository::new(db.clone()));
    let follow_repository = Arc::new(FollowRepository::new(db.clone()));
    let sleep_record_repository = Arc::new(SleepRecordRepository::new(db));

    let user_service = UserService::new(user_repository.clone());
    let follow_service = Arc::new(FollowService::new(
        follow_repository.clone(),
        user_repository,
    ));
    let sleep_record_service = Arc::new(SleepRecordService::new(
        sleep_record_repository,
        follow_repository,
    ));

    (user_service, follow_service, sleep_record_service)
}

pub fn init_tracing(settings: &settings::Settings) {
    let env = settings.environment.clone().unwrap_or("DEV".to_string());
    let level = match env.as_str() {
        "PROD" => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(env != "PROD")
        .init();
}
