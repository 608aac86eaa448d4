use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_FILE: &str = "coffee-finder.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not install log subscriber: {0}")]
    Init(String),
}

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// Interactive runs log to the configured file, headless runs to stderr.
    pub fn for_run(headless: bool, log_file: &Path) -> Self {
        if headless {
            Self::Stderr
        } else {
            Self::File(log_file.to_path_buf())
        }
    }
}

/// `--debug` wins; otherwise `RUST_LOG`, falling back to `info`.
pub fn filter_directive(debug: bool, rust_log: Option<&str>) -> String {
    if debug {
        return "debug".to_string();
    }
    rust_log
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("info")
        .to_string()
}

/// `LOG_FILE` relative to `base_dir`, or the default file name.
pub fn log_path(base_dir: &Path, log_file: Option<&str>) -> PathBuf {
    base_dir.join(log_file.unwrap_or(DEFAULT_LOG_FILE))
}

pub fn init(target: &LogTarget, debug: bool) -> Result<(), LoggingError> {
    let directive = filter_directive(debug, std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);

    let result = match target {
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|err| LoggingError::Init(err.to_string()))
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_overrides_rust_log() {
        assert_eq!(filter_directive(true, Some("warn")), "debug");
        assert_eq!(filter_directive(false, Some("coffee_finder=trace")), "coffee_finder=trace");
        assert_eq!(filter_directive(false, Some("  ")), "info");
        assert_eq!(filter_directive(false, None), "info");
    }

    #[test]
    fn log_path_defaults_next_to_base_dir() {
        assert_eq!(
            log_path(Path::new("/var/app"), None),
            PathBuf::from("/var/app/coffee-finder.log")
        );
        assert_eq!(
            log_path(Path::new("/var/app"), Some("logs/tui.log")),
            PathBuf::from("/var/app/logs/tui.log")
        );
    }

    #[test]
    fn interactive_runs_log_to_configured_file() -> Result<(), crate::config::ConfigError> {
        let config = crate::config::AppConfig::from_lookup(Path::new("/var/app"), |key| {
            (key == "LOG_FILE").then(|| "logs/tui.log".to_string())
        })?;
        assert_eq!(
            LogTarget::for_run(false, &config.log_file),
            LogTarget::File(PathBuf::from("/var/app/logs/tui.log"))
        );
        assert_eq!(LogTarget::for_run(true, &config.log_file), LogTarget::Stderr);
        Ok(())
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let path = Path::new("/definitely/not/a/dir/coffee.log");
        let err = open_log_file(path);
        assert!(matches!(err, Err(LoggingError::Open { .. })));
    }
}
