use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub environment: Option<String>,
    pub database_url: String,
    pub port: Option<u16>,
    /// Requests allowed per throttle window (default 60).
    pub rate_limit_number: Option<u32>,
    /// Throttle window length in seconds (default 60).
    pub rate_limit_period: Option<u64>,
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder();
    let settings = settings.add_source(Environment::default());
    settings.build()?.try_deserialize()
}
