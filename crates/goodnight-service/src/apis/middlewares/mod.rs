pub mod auth;
pub mod throttle;
