pub mod follow_service;
pub mod sleep_record_service;
pub mod user_service;
