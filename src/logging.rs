//! File logging.
//!
//! The terminal is in raw mode while playing, so log output goes to a file
//! or nowhere.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber if a log path is configured.
///
/// Returns whether logging was enabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter: {}", config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_disables_logging() {
        assert!(!init(&Config::default()).unwrap());
    }

    #[test]
    fn test_bad_filter_is_error() {
        let dir = std::env::temp_dir().join(format!("drop-tetris-log-{}", std::process::id()));
        let config = Config {
            log_path: Some(dir),
            log_level: "drop_tetris=loud".to_string(),
            ..Config::default()
        };
        assert!(init(&config).is_err());
    }
}
