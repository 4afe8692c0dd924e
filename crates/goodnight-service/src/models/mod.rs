pub mod follows;
pub mod sleep_records;
pub mod users;
