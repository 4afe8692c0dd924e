pub mod follow_repository;
pub mod sleep_record_repository;
pub mod user_repository;
