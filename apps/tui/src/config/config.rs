use crate::domain::Coordinate;
use crate::logging::log_path;
use crate::map::{RendererKind, UnknownRenderer};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not resolve working directory: {0}")]
    WorkingDir(#[from] std::io::Error),

    #[error("database path is not valid UTF-8: {0}")]
    InvalidDatabasePath(PathBuf),

    #[error(transparent)]
    Renderer(#[from] UnknownRenderer),

    #[error("invalid {key} value '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub database_url: String,
    pub map_renderer: RendererKind,
    pub log_file: PathBuf,
    /// Point distances are measured from when a location has no label.
    pub origin: Option<Coordinate>,
}

/// Reads configuration from the process environment. `.env` is loaded by
/// the caller beforehand.
pub fn init_app_config() -> Result<AppConfig, ConfigError> {
    let base_dir = env::current_dir()?;
    AppConfig::from_lookup(&base_dir, |key| env::var(key).ok())
}

impl AppConfig {
    /// Builds configuration from any key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_name = lookup("DATABASE_NAME").unwrap_or_else(|| "coffee.db".to_string());
        let database_path = base_dir.join(&db_name);
        let database_url = database_url(&database_path)?;

        let map_renderer = match lookup("MAP_RENDERER") {
            Some(value) => value.parse()?,
            None => RendererKind::default(),
        };

        let log_file = log_path(base_dir, lookup("LOG_FILE").as_deref());

        let origin = match (lookup("ORIGIN_LAT"), lookup("ORIGIN_LON")) {
            (Some(lat), Some(lon)) => Some(Coordinate {
                latitude: parse_number("ORIGIN_LAT", &lat)?,
                longitude: parse_number("ORIGIN_LON", &lon)?,
            }),
            (None, None) => None,
            _ => {
                warn!("ORIGIN_LAT and ORIGIN_LON must be set together, ignoring origin");
                None
            }
        };

        Ok(Self {
            database_path,
            database_url,
            map_renderer,
            log_file,
            origin,
        })
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

/// SQLx wants `sqlite:///abs/path` for absolute paths and
/// `sqlite://rel/path` for relative ones.
pub fn database_url(path: &Path) -> Result<String, ConfigError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidDatabasePath(path.to_path_buf()))?;
    let clean_path = path_str.trim_start_matches('/');

    if path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}
