#[allow(clippy::module_inception)]
mod config;

pub use config::{database_url, init_app_config, AppConfig, ConfigError};
