//! Startup configuration for the interactive shell.

use notekeep_core::{default_log_level, LogLevel, StoreConfig};
use std::path::PathBuf;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "NOTEKEEP_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fixed `notes.json` in the working directory.
    pub store: StoreConfig,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    pub fn resolve() -> Self {
        Self::from_level_override(std::env::var(LOG_LEVEL_ENV).ok())
    }

    /// Unparsable overrides fall back to the build default with a warning.
    pub fn from_level_override(level: Option<String>) -> Self {
        let log_level = match level.as_deref().map(str::parse::<LogLevel>) {
            Some(Ok(level)) => level,
            Some(Err(err)) => {
                eprintln!("warning: ignoring {LOG_LEVEL_ENV}: {err}");
                default_log_level()
            }
            None => default_log_level(),
        };

        Self {
            store: StoreConfig::default(),
            log_level,
            log_dir: std::env::temp_dir().join("notekeep").join("logs"),
        }
    }
}
